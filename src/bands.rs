// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the rows of an image into contiguous bands, one per worker.

use std::ops::Range;

/// A half-open range of rows, `[start, end)`, rendered by one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Band {
    /// First row of the band.
    pub start: usize,
    /// One past the last row of the band.
    pub end: usize,
}

impl Band {
    /// The rows of this band.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of rows in the band.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a band with no rows.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Divides `height` rows among `workers` bands.  Every band gets
/// `height / workers` rows, except the last, which runs to `height` and
/// picks up the remainder.  A `workers` of zero is treated as one.
pub fn partition(height: usize, workers: usize) -> Vec<Band> {
    let workers = workers.max(1);
    let rows_per_worker = height / workers;
    (0..workers)
        .map(|i| Band {
            start: i * rows_per_worker,
            end: if i == workers - 1 {
                height
            } else {
                (i + 1) * rows_per_worker
            },
        })
        .collect()
}
