//! Input mode and image format selections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user is submitting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    #[serde(rename = "Text Only")]
    TextOnly,
    #[serde(rename = "Image Only")]
    ImageOnly,
    #[serde(rename = "Text + Image")]
    TextAndImage,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [Self::TextOnly, Self::ImageOnly, Self::TextAndImage];

    pub fn label(self) -> &'static str {
        match self {
            Self::TextOnly => "Text Only",
            Self::ImageOnly => "Image Only",
            Self::TextAndImage => "Text + Image",
        }
    }

    /// Parse a label ("Text + Image") or a short form ("text", "image", "both").
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|m| m.label().eq_ignore_ascii_case(s)).or_else(|| {
            match s.to_lowercase().as_str() {
                "text" => Some(Self::TextOnly),
                "image" => Some(Self::ImageOnly),
                "both" | "text+image" => Some(Self::TextAndImage),
                _ => None,
            }
        })
    }

    pub fn accepts_text(self) -> bool {
        matches!(self, Self::TextOnly | Self::TextAndImage)
    }

    pub fn accepts_image(self) -> bool {
        matches!(self, Self::ImageOnly | Self::TextAndImage)
    }

    /// Whether the mode involves an image at all.
    pub fn is_image_based(self) -> bool {
        self.label().contains("Image")
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepted image container formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [Self::Png, Self::Jpg, Self::Jpeg];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL.into_iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
