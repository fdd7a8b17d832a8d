// Image decoding and verification
// Author: kelexine (https://github.com/kelexine)

use super::models::{DecodedImage, ImageFormat};
use crate::error::{RelayError, Result, ValidationError};
use base64::Engine;
use tracing::debug;

/// Decode a `data:<mime>;base64,<payload>` string into raw bytes.
///
/// Only the part after the first comma is decoded; the header is not
/// interpreted.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (_header, payload) = data_url
        .split_once(',')
        .ok_or(ValidationError::InvalidImageData)?;

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| {
            debug!("Rejected data URL payload: {}", e);
            ValidationError::InvalidImageData.into()
        })
}

/// Check that `bytes` decode as a raster image and hand them back unchanged.
///
/// Decoder failures of any kind, including panics inside codec code, come
/// back as [`RelayError::InvalidImage`].
pub fn verify_image(bytes: Vec<u8>) -> Result<DecodedImage> {
    let format = ImageFormat::sniff(&bytes);

    let outcome = std::panic::catch_unwind(|| image::load_from_memory(&bytes).map(|_| ()));
    match outcome {
        Ok(Ok(())) => Ok(DecodedImage {
            bytes,
            verified: true,
            format,
        }),
        Ok(Err(e)) => Err(RelayError::InvalidImage(e.to_string())),
        Err(_) => Err(RelayError::InvalidImage("image decoder panicked".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 128, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_verify_valid_png() {
        let bytes = png_bytes();
        let decoded = verify_image(bytes.clone()).unwrap();
        assert!(decoded.verified);
        assert_eq!(decoded.bytes, bytes);
        assert_eq!(decoded.format, Some(ImageFormat::Png));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let err = verify_image(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, RelayError::InvalidImage(_)));
    }

    #[test]
    fn test_verify_rejects_truncated_png() {
        let mut bytes = png_bytes();
        bytes.truncate(20);
        assert!(matches!(verify_image(bytes), Err(RelayError::InvalidImage(_))));
    }

    #[test]
    fn test_verify_rejects_empty() {
        assert!(verify_image(Vec::new()).is_err());
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_data_url_without_comma() {
        let err = decode_data_url("data:image/png;base64").unwrap_err();
        assert!(matches!(
            err,
            RelayError::Validation(ValidationError::InvalidImageData)
        ));
    }

    #[test]
    fn test_decode_data_url_bad_base64() {
        let err = decode_data_url("data:image/png;base64,not-valid-base64!!!").unwrap_err();
        assert!(matches!(
            err,
            RelayError::Validation(ValidationError::InvalidImageData)
        ));
    }
}
