// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test and the palette.
//!
//! A point `c` is iterated through `z = z² + c` starting from zero.
//! Once the orbit is farther than 2 from the origin it is guaranteed
//! to run off to infinity, so the number of steps it took to get there
//! is a measure of how quickly `c` diverges.  Points that are still
//! inside after `limit` steps are treated as members of the set.

use num::Complex;

/// Bytes per pixel in the output buffer: red, green, blue.
pub const CHANNELS: usize = 3;

/// The bailout radius.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// One pixel's worth of color, in R, G, B order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; CHANNELS]);

/// Returns the 0-based index of the first step whose result lies
/// outside the bailout radius, or `limit` if the orbit never leaves it.
///
/// The magnitude is taken as `sqrt(re² + im²)` rather than `norm()`,
/// which goes through `hypot` and can differ in the last bit.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: usize) -> usize {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        z = z * z + c;
        if (z.re * z.re + z.im * z.im).sqrt() > ESCAPE_RADIUS {
            return i;
        }
    }
    limit
}

/// Maps an iteration count onto a smooth polynomial palette.  Both
/// ends of the range are black.
///
/// `t` is single precision, as are the red and green products; blue
/// is carried in double precision.  Every channel is truncated, not
/// rounded, so the output matches the C tool byte for byte.
#[inline]
pub fn colorize(itrs: usize, limit: usize) -> Rgb {
    let t = itrs as f32 / limit as f32;
    let u = 1.0 - t;
    let r = 9.0 * u * t * t * t * 255.0;
    let g = 15.0 * u * u * t * t * 255.0;
    let b = 8.5 * f64::from(u) * f64::from(u) * f64::from(u) * f64::from(t) * 255.0;
    Rgb([r as u8, g as u8, b as u8])
}
