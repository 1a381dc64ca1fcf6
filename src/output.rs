// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Hands the finished buffer to the image crate.  The format follows
//! the file extension: PNG, or binary PPM.

use std::convert::TryFrom;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::error::{
    ImageFormatHint, LimitError, LimitErrorKind, ParameterError, ParameterErrorKind,
    UnsupportedError, UnsupportedErrorKind,
};
use image::{ColorType, ImageEncoder, ImageError, ImageFormat};

use crate::error::RenderError;
use crate::escape::CHANNELS;

fn encode(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<(), ImageError> {
    let dimension_error = || ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError));
    let w = u32::try_from(width).map_err(|_| dimension_error())?;
    let h = u32::try_from(height).map_err(|_| dimension_error())?;
    if Some(pixels.len()) != width.checked_mul(height).and_then(|n| n.checked_mul(CHANNELS)) {
        return Err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )));
    }

    let format = ImageFormat::from_path(path)?;
    match format {
        ImageFormat::Png => {
            let output = BufWriter::new(File::create(path)?);
            PngEncoder::new(output).write_image(pixels, w, h, ColorType::Rgb8)
        }
        ImageFormat::Pnm => {
            let output = BufWriter::new(File::create(path)?);
            PnmEncoder::new(output)
                .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
                .write_image(pixels, w, h, ColorType::Rgb8)
        }
        other => Err(ImageError::Unsupported(
            UnsupportedError::from_format_and_kind(
                ImageFormatHint::Exact(other),
                UnsupportedErrorKind::Format(ImageFormatHint::Exact(other)),
            ),
        )),
    }
}

/// Writes a packed RGB buffer, `width * 3` bytes per row with no
/// padding, to `path`.
pub fn write_image<P: AsRef<Path>>(
    path: P,
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    encode(path, pixels, width, height).map_err(|cause| RenderError::Encode {
        path: path.display().to_string(),
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        (0..width * height * CHANNELS).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn png_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let pixels = gradient(17, 5);
        write_image(&path, &pixels, 17, 5).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (17, 5));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn ppm_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gradient.ppm");
        let pixels = gradient(9, 4);
        write_image(&path, &pixels, 9, 4).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn short_buffer_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.png");
        let err = write_image(&path, &[0u8; 10], 2, 2).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!path.exists());
    }

    #[test]
    fn unknown_extension_is_refused() {
        let dir = tempdir().unwrap();
        for name in &["image.xyz", "image"] {
            let path = dir.path().join(name);
            let err = write_image(&path, &gradient(2, 2), 2, 2).unwrap_err();
            assert_eq!(err.exit_code(), 3);
        }
    }

    #[test]
    fn missing_directory_is_an_encode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("place.png");
        match write_image(&path, &gradient(2, 2), 2, 2) {
            Err(RenderError::Encode { path: p, .. }) => assert!(p.ends_with("place.png")),
            other => panic!("expected an encode error, got {:?}", other),
        }
    }
}
