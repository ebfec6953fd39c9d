//! Payment code rendering
//!
//! Encodes UPI payment text into a PNG QR image. Deterministic for a given
//! payload; empty or unencodable payloads come back as errors, never panics.

use std::io::Cursor;

use image::Luma;
use qrcode::QrCode;

use crate::application::errors::QrError;
use crate::domain::traits::PaymentCodeRenderer;

/// Pixel width/height floor for the rendered image
const MIN_DIMENSIONS: u32 = 256;

pub struct QrPngRenderer;

impl PaymentCodeRenderer for QrPngRenderer {
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrError> {
        render_png(payload)
    }
}

pub fn render_png(payload: &str) -> Result<Vec<u8>, QrError> {
    if payload.trim().is_empty() {
        return Err(QrError::EmptyPayload);
    }

    let code = QrCode::new(payload.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
        .build();

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| QrError::Encode(e.to_string()))?;
    Ok(bytes)
}
