#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of zero under `z = z² + c` stays bounded.  To
//! draw it we sample one point per pixel, iterate it until it either
//! leaves the circle of radius 2 (after which it is guaranteed to
//! escape to infinity) or runs out of iterations, and color the pixel
//! by how long that took.
//!
//! Every pixel is independent of every other, so the image's rows are
//! split into a fixed number of contiguous bands and each band is
//! rendered on its own thread, straight into its own slice of the
//! output buffer.  When the last thread is joined the buffer is ready
//! for the encoder.

pub mod bands;
pub mod config;
pub mod error;
pub mod escape;
pub mod output;
pub mod planes;
pub mod renderer;

pub use bands::{partition, Band};
pub use config::RenderConfig;
pub use error::RenderError;
pub use escape::{colorize, escape_time, Rgb, CHANNELS};
pub use output::write_image;
pub use planes::{Pixel, PlaneMapper, Viewport};
pub use renderer::BandRenderer;
