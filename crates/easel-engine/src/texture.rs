//! CPU-side texture data and handles.
//!
//! Decoding goes through the `image` crate; uploading is the backend's job
//! (see [`crate::backend::Backend::create_texture`]).

use std::fmt;
use std::path::{Path, PathBuf};

/// Backend-owned texture handle.
///
/// `TextureId::NULL` (0) never names a live texture. Handles are plain values:
/// the backend does not reference-count them, and releasing one is always an
/// explicit `destroy_texture` call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub const NULL: Self = Self(0);

    /// Wraps a raw backend id. Backends must never hand out `0`.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Error produced while decoding or uploading texture data.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// The file could not be opened or decoded.
    Decode { path: PathBuf, message: String },
    /// Pixel buffer length does not match `width * height * 4`.
    BadLength { expected: usize, actual: usize },
    /// Zero-sized image.
    Empty,
    /// Larger than the device's maximum 2D texture dimension.
    TooLarge { width: u32, height: u32, max: u32 },
    /// No GPU device yet (window not open).
    NoDevice,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, message } => {
                write!(f, "failed to decode image {}: {message}", path.display())
            }
            TextureError::BadLength { expected, actual } => {
                write!(f, "rgba buffer has {actual} bytes, expected {expected}")
            }
            TextureError::Empty => write!(f, "image has zero width or height"),
            TextureError::TooLarge { width, height, max } => {
                write!(f, "image is {width}x{height}, device limit is {max}")
            }
            TextureError::NoDevice => write!(f, "no GPU device; open the window first"),
        }
    }
}

impl std::error::Error for TextureError {}

/// Decoded RGBA8 (straight alpha, sRGB) pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decodes an image file into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| TextureError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Wraps an existing RGBA8 buffer, validating its length.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::BadLength { expected, actual: rgba.len() });
        }
        Ok(Self { width, height, rgba })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_null() {
        assert!(TextureId::NULL.is_null());
        assert!(TextureId::default().is_null());
        assert!(!TextureId::from_raw(7).is_null());
    }

    #[test]
    fn from_rgba_validates_length() {
        assert!(TextureData::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            TextureData::from_rgba(2, 2, vec![0; 15]),
            Err(TextureError::BadLength { expected: 16, actual: 15 })
        );
        assert_eq!(TextureData::from_rgba(0, 2, vec![]), Err(TextureError::Empty));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = TextureData::load("/nonexistent/easel/image.png").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
