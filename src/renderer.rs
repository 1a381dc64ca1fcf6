// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The band scheduler.
//!
//! The image's rows are cut into one band per worker and the pixel
//! buffer is cut along the same lines into disjoint mutable slices.
//! Each worker owns its slice outright for the length of the render,
//! so the workers never need to talk to each other; the only
//! synchronization is the join at the end of the crossbeam scope.

use itertools::iproduct;
use log::{debug, trace};

use crate::bands::{partition, Band};
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::escape::{colorize, escape_time, CHANNELS};
use crate::planes::{Pixel, PlaneMapper};

/// Renders the Mandelbrot set into an RGB buffer, one band of rows per
/// thread.  Once built, this object is read-only.
#[derive(Debug)]
pub struct BandRenderer {
    plane: PlaneMapper,
    limit: usize,
    workers: usize,
}

impl BandRenderer {
    /// Validates the configuration and sets up the mapping from pixels
    /// to the complex plane.
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let plane = PlaneMapper::new(config.width, config.height, config.viewport)?;
        Ok(BandRenderer {
            plane,
            limit: config.limit,
            workers: config.workers,
        })
    }

    /// The pixel to point mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Bytes in one row of the output: no padding between rows.
    pub fn stride(&self) -> usize {
        self.plane.width() * CHANNELS
    }

    /// The bands this renderer will hand out.
    pub fn bands(&self) -> Vec<Band> {
        partition(self.plane.height(), self.workers)
    }

    /// Obtains a zeroed buffer for the whole image, or reports that it
    /// couldn't.  Nothing is rendered until this has succeeded.
    pub fn allocate(&self) -> Result<Vec<u8>, RenderError> {
        let bytes = self
            .plane
            .byte_len(CHANNELS)
            .ok_or(RenderError::Allocation { bytes: usize::MAX })?;
        let mut buffer: Vec<u8> = Vec::new();
        buffer
            .try_reserve_exact(bytes)
            .map_err(|_| RenderError::Allocation { bytes })?;
        buffer.resize(bytes, 0);
        Ok(buffer)
    }

    /// Fills in one band.  `pixels` is the band's own slice of the
    /// image, starting at the band's first row.
    pub(crate) fn render_band(&self, band: Band, pixels: &mut [u8]) {
        assert_eq!(pixels.len(), band.len() * self.stride());
        let cells = iproduct!(band.rows(), 0..self.plane.width());
        for ((row, column), pixel) in cells.zip(pixels.chunks_exact_mut(CHANNELS)) {
            let point = self.plane.pixel_to_point(&Pixel(column, row));
            let itrs = escape_time(point, self.limit);
            pixel.copy_from_slice(&colorize(itrs, self.limit).0);
        }
    }

    /// The single-threaded render, for comparison.
    pub fn render_single(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = self.allocate()?;
        let whole = Band {
            start: 0,
            end: self.plane.height(),
        };
        self.render_band(whole, &mut buffer);
        Ok(buffer)
    }

    /// Renders into a caller-supplied buffer, one thread per band, and
    /// returns once every band is done.  The buffer must be exactly the
    /// size `allocate` would have made it.
    pub fn render_into(&self, buffer: &mut [u8]) -> Result<(), RenderError> {
        let expected = self.plane.byte_len(CHANNELS);
        if expected != Some(buffer.len()) {
            return Err(RenderError::InvalidConfig(format!(
                "pixel buffer is {} bytes, the image needs {}",
                buffer.len(),
                expected.map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string())
            )));
        }
        let regions = split_bands(buffer, &self.bands(), self.stride());
        debug!(
            "rendering {}x{} in {} bands",
            self.plane.width(),
            self.plane.height(),
            regions.len()
        );
        let joined = crossbeam::scope(|spawner| {
            for (index, (band, region)) in regions.into_iter().enumerate() {
                spawner.spawn(move |_| {
                    self.render_band(band, region);
                    trace!("band {} (rows {}..{}) done", index, band.start, band.end);
                });
            }
        });
        // The workers do nothing but arithmetic; if one of them
        // panicked, carry it on up.
        if let Err(panic) = joined {
            std::panic::resume_unwind(panic);
        }
        Ok(())
    }

    /// Allocates the buffer and renders the image into it.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = self.allocate()?;
        self.render_into(&mut buffer)?;
        Ok(buffer)
    }
}

/// Cuts `buffer` into one mutable slice per band.  The bands must be
/// contiguous and start at row zero, which is what `partition`
/// produces.
fn split_bands<'a>(
    buffer: &'a mut [u8],
    bands: &[Band],
    stride: usize,
) -> Vec<(Band, &'a mut [u8])> {
    let mut rest = buffer;
    let mut regions = Vec::with_capacity(bands.len());
    for band in bands {
        let (region, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * stride);
        regions.push((*band, region));
        rest = tail;
    }
    regions
}
