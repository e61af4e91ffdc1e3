use alloc::vec::Vec;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, RgbColor, raw::RawU16};
use log::debug;

/// Bytes per encoded pixel.
pub const BYTES_PER_PIXEL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    EmptyImage,
    SizeMismatch { expected: usize, actual: usize },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::EmptyImage => write!(f, "image has no pixels"),
            EncodeError::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} bytes of RGBA8 data, got {actual}")
            }
        }
    }
}

type Result<T> = core::result::Result<T, EncodeError>;

/// Packs an 8-bit RGB triple into RGB565 by dropping the low bits of each channel.
pub fn pack(r: u8, g: u8, b: u8) -> u16 {
    Rgb565::new(r >> 3, g >> 2, b >> 3).into_storage()
}

/// Splits an RGB565 value back into its 5/6/5 bit channels.
pub fn unpack(value: u16) -> (u8, u8, u8) {
    let color = Rgb565::from(RawU16::new(value));
    (color.r(), color.g(), color.b())
}

/// Packed little-endian RGB565 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgb565Buffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Rgb565Buffer {
    /// Encodes tightly packed RGBA8 pixels. Alpha is discarded.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EncodeError::EmptyImage);
        }
        let pixels = width as usize * height as usize;
        if rgba.len() != pixels * 4 {
            return Err(EncodeError::SizeMismatch {
                expected: pixels * 4,
                actual: rgba.len(),
            });
        }

        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        let mut translucent = 0usize;
        for px in rgba.chunks_exact(4) {
            if px[3] != 0xFF {
                translucent += 1;
            }
            data.extend_from_slice(&pack(px[0], px[1], px[2]).to_le_bytes());
        }
        if translucent > 0 {
            debug!("Dropped alpha of {translucent} translucent pixels ({width}x{height})");
        }

        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decoded pixel values in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = u16> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn pack_primaries() {
        assert_eq!(pack(0xFF, 0x00, 0x00), 0xF800);
        assert_eq!(pack(0x00, 0xFF, 0x00), 0x07E0);
        assert_eq!(pack(0x00, 0x00, 0xFF), 0x001F);
        assert_eq!(pack(0xFF, 0xFF, 0xFF), 0xFFFF);
        assert_eq!(pack(0x00, 0x00, 0x00), 0x0000);
    }

    #[test]
    fn pack_truncates() {
        // 0x07 >> 3 == 0, rounding would give 1
        assert_eq!(pack(0x07, 0x03, 0x07), 0x0000);
        assert_eq!(pack(0x08, 0x04, 0x08), 0x0821);
        assert_eq!(pack(0xFC, 0xFE, 0xFC), 0xFFFF);
    }

    #[test]
    fn unpack_matches_truncated_channels() {
        for (r, g, b) in [(0u8, 0u8, 0u8), (255, 255, 255), (12, 200, 77), (129, 3, 254)] {
            assert_eq!(unpack(pack(r, g, b)), (r >> 3, g >> 2, b >> 3));
        }
    }

    #[test]
    fn two_pixel_image() {
        let rgba = [255, 0, 0, 255, 0, 255, 0, 128];
        let buffer = Rgb565Buffer::from_rgba8(2, 1, &rgba).unwrap();
        assert_eq!(buffer.as_bytes(), &[0x00, 0xF8, 0xE0, 0x07]);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.pixels().collect::<Vec<_>>(), vec![0xF800, 0x07E0]);
    }

    #[test]
    fn length_is_two_bytes_per_pixel() {
        let (w, h) = (7u32, 5u32);
        let rgba: Vec<u8> = (0..w * h * 4).map(|i| (i * 37 % 256) as u8).collect();
        let buffer = Rgb565Buffer::from_rgba8(w, h, &rgba).unwrap();
        assert_eq!(buffer.len(), (w * h * 2) as usize);

        for (px, value) in rgba.chunks_exact(4).zip(buffer.pixels()) {
            assert_eq!(unpack(value), (px[0] >> 3, px[1] >> 2, px[2] >> 3));
        }
    }

    #[test]
    fn alpha_is_ignored() {
        let opaque = Rgb565Buffer::from_rgba8(1, 1, &[10, 20, 30, 255]).unwrap();
        let clear = Rgb565Buffer::from_rgba8(1, 1, &[10, 20, 30, 0]).unwrap();
        assert_eq!(opaque, clear);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Rgb565Buffer::from_rgba8(2, 2, &[0u8; 12]),
            Err(EncodeError::SizeMismatch { expected: 16, actual: 12 })
        );
        assert_eq!(Rgb565Buffer::from_rgba8(0, 3, &[]), Err(EncodeError::EmptyImage));
    }
}
