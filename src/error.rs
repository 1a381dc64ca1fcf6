// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The three ways a render can go wrong.  Configuration errors are
//! caught before anything is allocated; allocation errors before any
//! worker starts; encode errors after the buffer is complete.  The
//! escape evaluator and the band partitioning cannot fail.

use failure::Fail;

/// Everything that can stop a render.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The viewport, dimensions, iteration limit or worker count is
    /// unusable.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The pixel buffer could not be obtained.
    #[fail(display = "failed to allocate {} bytes for the pixel buffer", bytes)]
    Allocation {
        /// Size of the buffer we asked for.
        bytes: usize,
    },

    /// The encoder rejected the buffer or could not write the file.
    #[fail(display = "failed to write {}: {}", path, cause)]
    Encode {
        /// Destination of the image.
        path: String,
        /// Whatever the image crate reported.
        #[cause]
        cause: image::ImageError,
    },
}

impl RenderError {
    /// Process exit status for this error.  Each fatal class gets its
    /// own.
    pub fn exit_code(&self) -> i32 {
        match self {
            RenderError::InvalidConfig(_) => 1,
            RenderError::Allocation { .. } => 2,
            RenderError::Encode { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let config = RenderError::InvalidConfig("zero width".to_string());
        let alloc = RenderError::Allocation { bytes: 12 };
        let encode = RenderError::Encode {
            path: "out.png".to_string(),
            cause: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )),
        };
        assert_eq!(config.exit_code(), 1);
        assert_eq!(alloc.exit_code(), 2);
        assert_eq!(encode.exit_code(), 3);
    }

    #[test]
    fn messages_name_the_problem() {
        let alloc = RenderError::Allocation { bytes: 6220800 };
        assert_eq!(
            alloc.to_string(),
            "failed to allocate 6220800 bytes for the pixel buffer"
        );
        let config = RenderError::InvalidConfig("zero width".to_string());
        assert_eq!(config.to_string(), "invalid configuration: zero width");
    }
}
