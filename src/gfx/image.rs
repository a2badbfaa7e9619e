//! Image loading
//!
//! Images come from disk, raw bytes or a URL and are decoded with the
//! `image` crate, then uploaded as macroquad textures. Callers that prefer
//! to keep running on a bad asset use the `*_or_placeholder` loaders, which
//! log the failure and hand back a checkerboard "missing image" texture.

use macroquad::prelude::{FilterMode, Texture2D};
use crate::Rect;

/// Largest texture edge we accept (macroquad takes u16 sizes)
pub const MAX_IMAGE_SIZE: u32 = u16::MAX as u32;

/// Downloads larger than this are rejected
#[cfg(not(target_arch = "wasm32"))]
const MAX_DOWNLOAD_BYTES: u64 = 32 * 1024 * 1024;

/// Edge length of the placeholder texture
pub const PLACEHOLDER_SIZE: u16 = 32;

#[derive(Debug)]
pub enum ImageError {
    Io(std::io::Error),
    Decode(String),
    Network(String),
    InvalidSize { width: u32, height: u32 },
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "I/O error: {}", e),
            ImageError::Decode(msg) => write!(f, "Decode error: {}", msg),
            ImageError::Network(msg) => write!(f, "Network error: {}", msg),
            ImageError::InvalidSize { width, height } => {
                write!(f, "Invalid image size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl From<std::io::Error> for ImageError {
    fn from(e: std::io::Error) -> Self {
        ImageError::Io(e)
    }
}

impl From<image::ImageError> for ImageError {
    fn from(e: image::ImageError) -> Self {
        ImageError::Decode(e.to_string())
    }
}

/// Decoded RGBA8 pixels, not yet on the GPU
#[derive(Debug, Clone, PartialEq)]
pub struct PixelData {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

impl PixelData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 || width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
            return Err(ImageError::InvalidSize { width, height });
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(ImageError::Decode(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                width as usize * height as usize * 4,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self { width: width as u16, height: height as u16, rgba })
    }

    /// Decode PNG/JPEG/BMP bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (w, h) = img.dimensions();
        Self::new(w, h, img.into_raw())
    }

    /// Magenta/black checkerboard with a red border
    pub fn placeholder() -> Self {
        let size = PLACEHOLDER_SIZE as usize;
        let cell = size / 4;
        let mut rgba = Vec::with_capacity(size * size * 4);
        for y in 0..size {
            for x in 0..size {
                let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                let px: [u8; 4] = if border {
                    [255, 0, 0, 255]
                } else if (x / cell + y / cell) % 2 == 0 {
                    [255, 0, 255, 255]
                } else {
                    [0, 0, 0, 255]
                };
                rgba.extend_from_slice(&px);
            }
        }
        Self { width: PLACEHOLDER_SIZE, height: PLACEHOLDER_SIZE, rgba }
    }
}

/// A GPU texture plus its size
#[derive(Clone)]
pub struct Image {
    texture: Texture2D,
    width: f32,
    height: f32,
    is_placeholder: bool,
}

impl Image {
    pub fn from_pixels(pixels: &PixelData) -> Self {
        let texture = Texture2D::from_rgba8(pixels.width, pixels.height, &pixels.rgba);
        texture.set_filter(FilterMode::Nearest);
        Self {
            texture,
            width: pixels.width as f32,
            height: pixels.height as f32,
            is_placeholder: false,
        }
    }

    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageError> {
        Ok(Self::from_pixels(&PixelData::new(width, height, rgba)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        Ok(Self::from_pixels(&PixelData::decode(bytes)?))
    }

    /// Load through macroquad's file API (works on native and web)
    pub async fn load(path: &str) -> Result<Self, ImageError> {
        let bytes = macroquad::file::load_file(path)
            .await
            .map_err(|e| ImageError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())))?;
        Self::from_bytes(&bytes)
    }

    pub async fn load_or_placeholder(path: &str) -> Self {
        match Self::load(path).await {
            Ok(img) => {
                tracing::debug!(path, "loaded image");
                img
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to load image, using placeholder");
                Self::placeholder()
            }
        }
    }

    /// Synchronous disk load
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file_or_placeholder(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        Self::load_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to load image, using placeholder");
            Self::placeholder()
        })
    }

    /// Blocking download
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_url(url: &str) -> Result<Self, ImageError> {
        Self::from_bytes(&fetch_url(url)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_url_or_placeholder(url: &str) -> Self {
        Self::from_url(url).unwrap_or_else(|e| {
            tracing::warn!(url, error = %e, "failed to fetch image, using placeholder");
            Self::placeholder()
        })
    }

    pub fn placeholder() -> Self {
        let mut img = Self::from_pixels(&PixelData::placeholder());
        img.is_placeholder = true;
        img
    }

    pub fn texture(&self) -> &Texture2D {
        &self.texture
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// True when this image stands in for one that failed to load
    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }

    pub fn set_smooth(&self, smooth: bool) {
        self.texture.set_filter(if smooth { FilterMode::Linear } else { FilterMode::Nearest });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_url(url: &str) -> Result<Vec<u8>, ImageError> {
    use std::io::Read;

    let response = ureq::get(url).call().map_err(|e| ImageError::Network(e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_BYTES)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Grid of equally sized frames inside one image
#[derive(Clone)]
pub struct SpriteSheet {
    pub image: Image,
    columns: u32,
    rows: u32,
}

impl SpriteSheet {
    pub fn new(image: Image, columns: u32, rows: u32) -> Self {
        Self { image, columns: columns.max(1), rows: rows.max(1) }
    }

    pub fn frame_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Source rectangle of frame `index` in pixels, row-major. Wraps around.
    pub fn frame(&self, index: u32) -> Rect {
        frame_rect(self.image.width(), self.image.height(), self.columns, self.rows, index)
    }
}

fn frame_rect(width: f32, height: f32, columns: u32, rows: u32, index: u32) -> Rect {
    let index = index % (columns * rows);
    let fw = width / columns as f32;
    let fh = height / rows as f32;
    Rect::new((index % columns) as f32 * fw, (index / columns) as f32 * fh, fw, fh)
}
