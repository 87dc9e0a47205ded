//! Card image fetching.
//!
//! Each image is a plain GET that must answer 200 with a payload whose
//! signature matches a known image format. Failures stay on the card that
//! owns the image.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

use crate::results::card::{Card, ImageSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// Identify a payload by its leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
        if bytes.starts_with(PNG) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else if bytes.starts_with(b"BM") && bytes.len() > 14 {
            Some(ImageFormat::Bmp)
        } else {
            None
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("payload is not a recognised image")]
    Undecodable,
    #[error("image exceeds {0} bytes")]
    TooLarge(usize),
}

/// Successfully fetched image bytes.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

/// Base64 `data:` URI for inline embedding.
pub fn data_uri(format: ImageFormat, data: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime(), STANDARD.encode(data))
}

pub struct ImageFetcher {
    http: reqwest::Client,
    max_bytes: usize,
}

impl ImageFetcher {
    /// `max_bytes` caps a single payload; larger images fail without
    /// being buffered.
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, ImageError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ImageError::Network)?;
        Ok(Self { http, max_bytes })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageError> {
        let mut resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ImageError::Network)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(ImageError::Status(status.as_u16()));
        }

        if resp
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(ImageError::TooLarge(self.max_bytes));
        }

        let mut data = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(ImageError::Network)? {
            if data.len() + chunk.len() > self.max_bytes {
                return Err(ImageError::TooLarge(self.max_bytes));
            }
            data.extend_from_slice(&chunk);
        }
        let format = ImageFormat::sniff(&data).ok_or(ImageError::Undecodable)?;
        Ok(FetchedImage { format, data })
    }

    /// Resolve one card's pending image in place.
    pub async fn resolve(&self, card: &mut Card) {
        let url = match &card.image {
            ImageSlot::Pending { url } => url.clone(),
            _ => return,
        };
        card.image = match self.fetch(&url).await {
            Ok(img) => ImageSlot::Loaded {
                url,
                format: img.format,
                size: img.data.len(),
                data: img.data,
            },
            Err(e) => {
                tracing::warn!(dish = %card.title, "image fetch failed for {}: {}", url, e);
                ImageSlot::Failed {
                    url,
                    reason: e.to_string(),
                }
            }
        };
    }

    /// Resolve every pending image, one at a time in grid order.
    pub async fn resolve_grid(&self, rows: &mut [Vec<Card>]) {
        for card in rows.iter_mut().flatten() {
            self.resolve(card).await;
        }
    }
}
