// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport, a rectangle on the complex plane, and the
//! PlaneMapper, which relates an integral pixel plane with its origin
//! at 0,0 to that rectangle.
use num::Complex;

use crate::error::RenderError;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The rectangular region of the complex plane being sampled.  The
/// real part of each value is the x-component and the imaginary part
/// is the y-component.  Row 0 of the image sits at `imag_min`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub real_min: f64,
    /// Right edge.
    pub real_max: f64,
    /// Top row of the image.
    pub imag_min: f64,
    /// Bottom row of the image.
    pub imag_max: f64,
}

impl Viewport {
    /// Constructor.  Both spans must be finite and strictly positive.
    pub fn new(
        real_min: f64,
        real_max: f64,
        imag_min: f64,
        imag_max: f64,
    ) -> Result<Viewport, RenderError> {
        if ![real_min, real_max, imag_min, imag_max]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(RenderError::InvalidConfig(
                "viewport bounds must be finite".to_string(),
            ));
        }

        if real_max <= real_min {
            return Err(RenderError::InvalidConfig(
                "the left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if imag_max <= imag_min {
            return Err(RenderError::InvalidConfig(
                "the left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        Ok(Viewport {
            real_min,
            real_max,
            imag_min,
            imag_max,
        })
    }

    /// Builds a viewport out of two opposite corners.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Viewport, RenderError> {
        Viewport::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }
}

impl Default for Viewport {
    fn default() -> Viewport {
        Viewport {
            real_min: -2.0,
            real_max: 1.0,
            imag_min: -0.85,
            imag_max: 0.8375,
        }
    }
}

/// Maps pixels on the integral plane to samples in the viewport.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width and height of the image, in pixels.
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane being sampled.
    pub viewport: Viewport,
    // Distance on the complex plane between neighbouring pixels, real
    // then imaginary.
    increments: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the image dimensions and the viewport they
    /// cover.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let increments = (
            (viewport.real_max - viewport.real_min) / (width as f64),
            (viewport.imag_max - viewport.imag_min) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
            increments,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The per-pixel step along the real and imaginary axes.
    pub fn increments(&self) -> (f64, f64) {
        self.increments
    }

    /// The number of pixels in the image, or None if that doesn't fit
    /// in a usize.
    pub fn len(&self) -> Option<usize> {
        self.integral_plane.0.checked_mul(self.integral_plane.1)
    }

    /// Number of bytes an image of this plane needs at `channels`
    /// bytes per pixel, or None if that doesn't fit in a usize.
    pub fn byte_len(&self, channels: usize) -> Option<usize> {
        self.len().and_then(|n| n.checked_mul(channels))
    }

    /// Given a pixel on the integral cartesian plane, return the sample
    /// on the complex plane for it.  The offset is a multiple of the
    /// increment, so every worker computes the same sample for the same
    /// pixel.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport.real_min + (pixel.0 as f64) * self.increments.0,
            self.viewport.imag_min + (pixel.1 as f64) * self.increments.1,
        )
    }
}
