//! Image loading for the export pipeline.
//!
//! The pipeline only needs "given a URL, eventually get pixel dimensions and
//! pixel data, or a failure". [`ImageLoader`] is that seam; the HTTP backend
//! fetches with reqwest and decodes with the `image` crate.

use crate::{Error, Result};
use futures::future::BoxFuture;
use image::{DynamicImage, ImageFormat};

/// Pixel payload of a loaded image, in the form it is embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Original JPEG stream, embedded without re-encoding
    Jpeg { bytes: Vec<u8>, grayscale: bool },
    /// Row-major RGB8, plus one alpha byte per pixel when any pixel is
    /// not fully opaque
    Raw { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

impl ImageData {
    pub fn kind(&self) -> &'static str {
        match self {
            ImageData::Jpeg { .. } => "jpeg",
            ImageData::Raw { alpha: Some(_), .. } => "rgba",
            ImageData::Raw { alpha: None, .. } => "rgb",
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            ImageData::Jpeg { bytes, .. } => bytes.len(),
            ImageData::Raw { rgb, alpha } => rgb.len() + alpha.as_ref().map_or(0, Vec::len),
        }
    }
}

/// A loaded image with its pixel dimensions
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub data: ImageData,
}

impl LoadedImage {
    /// Opaque image from raw RGB8 pixels.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: ImageData::Raw { rgb, alpha: None },
        }
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("kind", &self.data.kind())
            .field("bytes", &self.data.byte_len())
            .finish()
    }
}

/// Resolves an image URL to a decoded image
pub trait ImageLoader: Send + Sync {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<LoadedImage>>;
}

/// Component count from the first SOF segment of a JPEG stream.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    let mut i = 2;
    loop {
        if *bytes.get(i)? != 0xFF {
            return None;
        }
        let marker = *bytes.get(i + 1)?;
        match marker {
            0xFF => i += 1,
            0x01 | 0xD0..=0xD8 => i += 2,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                return bytes.get(i + 9).copied();
            }
            _ => {
                let len = u16::from_be_bytes([*bytes.get(i + 2)?, *bytes.get(i + 3)?]) as usize;
                i += 2 + len;
            }
        }
    }
}

fn raw_pixels(decoded: &DynamicImage) -> ImageData {
    if !decoded.color().has_alpha() {
        return ImageData::Raw {
            rgb: decoded.to_rgb8().into_raw(),
            alpha: None,
        };
    }
    let rgba = decoded.to_rgba8();
    let rgb = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
    let alpha = rgba
        .pixels()
        .any(|p| p.0[3] < 255)
        .then(|| rgba.pixels().map(|p| p.0[3]).collect());
    ImageData::Raw { rgb, alpha }
}

/// Decode an encoded image (JPEG, PNG, ...).
///
/// Grayscale and RGB JPEGs keep their original stream; every other image is
/// stored as RGB8 with its alpha plane split off.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(Error::DecodeError(format!(
            "image has empty dimensions {}x{}",
            width, height
        )));
    }

    let data = match (format, jpeg_components(bytes)) {
        (ImageFormat::Jpeg, Some(n @ (1 | 3))) => ImageData::Jpeg {
            bytes: bytes.to_vec(),
            grayscale: n == 1,
        },
        _ => raw_pixels(&decoded),
    };
    Ok(LoadedImage { width, height, data })
}

#[cfg(feature = "http")]
pub use http::HttpImageLoader;

#[cfg(feature = "http")]
mod http {
    use super::{decode_image, ImageLoader, LoadedImage};
    use crate::{Error, ExportConfig, Result};
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use reqwest::header::{ACCEPT, USER_AGENT};
    use reqwest::Client;

    /// Fetches images over HTTP(S) and decodes them off the async runtime
    #[derive(Debug, Clone)]
    pub struct HttpImageLoader {
        client: Client,
        user_agent: String,
    }

    impl HttpImageLoader {
        pub fn new(config: &ExportConfig) -> Result<Self> {
            let client = Client::builder().build().map_err(|e| {
                Error::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;
            Ok(Self {
                client,
                user_agent: config.user_agent.clone(),
            })
        }

        async fn fetch(&self, url: &str) -> Result<LoadedImage> {
            let parsed = url::Url::parse(url)
                .map_err(|e| Error::LoadError(format!("invalid image url '{}': {}", url, e)))?;
            let res = self
                .client
                .get(parsed)
                .header(USER_AGENT, self.user_agent.clone())
                .header(ACCEPT, "image/*")
                .send()
                .await
                .map_err(|e| Error::LoadError(format!("GET {} failed: {}", url, e)))?;

            let status = res.status();
            if !status.is_success() {
                return Err(Error::LoadError(format!("GET {} returned {}", url, status)));
            }

            let bytes = res
                .bytes()
                .await
                .map_err(|e| Error::LoadError(format!("Failed to read body of {}: {}", url, e)))?;

            tokio::task::spawn_blocking(move || decode_image(&bytes))
                .await
                .map_err(|e| Error::Other(format!("Decode task failed: {}", e)))?
        }
    }

    impl ImageLoader for HttpImageLoader {
        fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<LoadedImage>> {
            self.fetch(url).boxed()
        }
    }
}
