//! Decoded bitmaps crossing the host boundary.
//!
//! The engine treats image content as opaque: it only ever reads the
//! dimensions and hands the pixels back to the host for display or to the
//! clipboard adapter. Decoding lives here so host adapters share one path.

use crate::geometry::Size;

/// An image decoded to straight-alpha RGBA, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageBitmap {
    /// Wrap an already-decoded RGBA buffer.
    ///
    /// The buffer length must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Bitmap width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The natural size as floating-point logical pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decode an encoded image (PNG, JPEG, ...) into an RGBA bitmap.
///
/// Used by host adapters; the engine core never calls this itself.
pub fn decode_bitmap(bytes: &[u8]) -> Result<ImageBitmap, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageBitmap::from_rgba8(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let mut img = image::RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgba([x as u8, y as u8, 128, 255]);
        }
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let png = encode_png(6, 4);
        let bitmap = decode_bitmap(&png).unwrap();
        assert_eq!(bitmap.width(), 6);
        assert_eq!(bitmap.height(), 4);
        assert_eq!(bitmap.size(), Size::new(6.0, 4.0));
        assert_eq!(bitmap.pixels().len(), 6 * 4 * 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_bitmap(b"not an image").is_err());
    }
}
