//! Image element data.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Image format, detected from the source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Svg,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            "svg" => Some(ImageFormat::Svg),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }
}

/// Image-specific element fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageElement {
    /// URL or path of the image. Loading is the host's job.
    pub src: String,
    /// Intrinsic size reported by the host once the image has loaded.
    #[serde(default)]
    pub natural_size: Option<Size>,
}

impl ImageElement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            natural_size: None,
        }
    }

    pub fn with_natural_size(mut self, size: Size) -> Self {
        self.natural_size = Some(size);
        self
    }

    /// Format guessed from the extension of `src`, ignoring query strings.
    pub fn format(&self) -> Option<ImageFormat> {
        let path = self.src.split(['?', '#']).next().unwrap_or_default();
        let (_, ext) = path.rsplit_once('.')?;
        ImageFormat::from_extension(ext)
    }
}
