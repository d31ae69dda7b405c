//! PNG encoding and data-URI wrapping.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{ImageFormat, RgbImage};

use crate::error::PlotError;

/// Media-type prefix of every URI produced by [`to_data_uri`].
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encodes a packed RGB buffer (`width * height * 3` bytes) as PNG.
pub fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let img = RgbImage::from_raw(width, height, pixels)
        .ok_or(PlotError::BufferMismatch { width, height })?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// `data:image/png;base64,<payload>` with the standard padded alphabet.
pub fn to_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    BASE64.encode_string(png, &mut uri);
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn encodes_png_signature() {
        let png = encode_png(vec![255; 4 * 3 * 3], 4, 3).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn rejects_short_buffer() {
        let err = encode_png(vec![0; 5], 4, 3).unwrap_err();
        assert!(matches!(err, PlotError::BufferMismatch { width: 4, height: 3 }));
    }

    #[test]
    fn data_uri_prefix_and_payload() {
        let uri = to_data_uri(b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn data_uri_pads() {
        assert_eq!(to_data_uri(b"ab"), "data:image/png;base64,YWI=");
        assert_eq!(to_data_uri(b""), PNG_DATA_URI_PREFIX);
    }
}
