use crate::domain::QrToken;
use crate::ports::qr_encoder::{QrEncoder, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Pixel size of one QR module
pub const MODULE_SIZE: u32 = 10;

/// PNG implementation of QrEncoder
///
/// Renders black modules on a white background with the standard
/// 4-module quiet zone and returns a `data:image/png;base64,...` URI.
pub struct PngQrEncoder {
    module_size: u32,
}

impl PngQrEncoder {
    pub fn new() -> Self {
        Self {
            module_size: MODULE_SIZE,
        }
    }

    pub fn with_module_size(module_size: u32) -> Self {
        Self { module_size }
    }

    /// Render the token as raw PNG bytes
    pub fn render_png(&self, token: &QrToken) -> Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(token.as_str().as_bytes(), EcLevel::L)?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(true)
            .build();

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode(&self, token: &QrToken) -> Result<String> {
        let png = self.render_png(token)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_png_has_png_signature() {
        let encoder = PngQrEncoder::new();
        let png = encoder.render_png(&QrToken::generate()).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_returns_data_uri() {
        let encoder = PngQrEncoder::new();
        let uri = encoder.encode(&QrToken::generate()).unwrap();

        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(&decoded[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_image_size_scales_with_module_size() {
        let token = QrToken::generate();
        let small = PngQrEncoder::with_module_size(1).render_png(&token).unwrap();
        let large = PngQrEncoder::with_module_size(10).render_png(&token).unwrap();

        let dims = |png: &[u8]| {
            let img = image::load_from_memory_with_format(png, ImageFormat::Png).unwrap();
            (img.width(), img.height())
        };
        let (sw, sh) = dims(&small);
        let (lw, lh) = dims(&large);
        assert_eq!(sw, sh);
        assert_eq!(lw, sw * 10);
        assert_eq!(lh, sh * 10);
    }
}
