// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters.  The defaults reproduce the stock 1920x1080
//! image of the whole set.

use std::path::PathBuf;

use crate::error::RenderError;
use crate::planes::Viewport;

/// Default image width in pixels.
pub const DEFAULT_WIDTH: usize = 1920;
/// Default image height in pixels.
pub const DEFAULT_HEIGHT: usize = 1080;
/// Default iteration cap.
pub const DEFAULT_LIMIT: usize = 100;
/// Default number of bands, and so of worker threads.
pub const DEFAULT_WORKERS: usize = 8;
/// Default output file.
pub const DEFAULT_OUTPUT: &str = "mandelbrot_set.png";

/// Everything a render needs to know, passed in once and read-only
/// afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration cap for the escape test.
    pub limit: usize,
    /// Number of bands the rows are split into.
    pub workers: usize,
    /// Region of the complex plane to sample.
    pub viewport: Viewport,
    /// Where the encoded image goes.
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            limit: DEFAULT_LIMIT,
            workers: DEFAULT_WORKERS,
            viewport: Viewport::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RenderConfig {
    /// Checks the values a render can't proceed without.  The viewport
    /// is checked again, since its fields are public.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.limit == 0 {
            return Err(RenderError::InvalidConfig(
                "iteration limit must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 || self.workers > self.height {
            return Err(RenderError::InvalidConfig(format!(
                "worker count must be between 1 and {}, got {}",
                self.height, self.workers
            )));
        }
        let vp = self.viewport;
        Viewport::new(vp.real_min, vp.real_max, vp.imag_min, vp.imag_max)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.limit, 100);
        assert_eq!(config.workers, 8);
        assert_eq!(config.output, PathBuf::from("mandelbrot_set.png"));
    }

    #[test]
    fn rejects_zero_sizes() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
        let config = RenderConfig {
            limit: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_worker_counts() {
        let config = RenderConfig {
            workers: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
        let config = RenderConfig {
            height: 4,
            workers: 5,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
        let config = RenderConfig {
            height: 4,
            workers: 4,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_viewport() {
        let mut config = RenderConfig::default();
        config.viewport.real_max = -3.0;
        match config.validate() {
            Err(RenderError::InvalidConfig(_)) => {}
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }
}
