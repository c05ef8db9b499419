/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the gallery file, the store and the UI layer.
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single generated (or uploaded) image in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Image {
    /// Unique, stable identifier assigned by the generation backend
    pub uuid: String,
    /// Full-size image location (absolute URL, server-relative path or local file)
    pub url: String,
    /// Smaller rendition for the gallery grid (None = use `url`)
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Modification time in unix seconds
    #[serde(default)]
    pub mtime: i64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub category: Category,
    /// Generation parameters; absent for uploads and foreign files
    #[serde(default)]
    pub metadata: Option<GenerationMetadata>,
}

impl Image {
    /// Location to show in the gallery grid
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }

    /// Local timestamp of the image, if `mtime` is a valid unix time
    pub fn generated_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.mtime, 0).single()
    }

    pub fn image_type(&self) -> Option<&ImageType> {
        self.metadata.as_ref().and_then(|m| m.kind.as_ref())
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.metadata.as_ref().and_then(|m| m.prompt.as_ref())
    }

    pub fn seed(&self) -> Option<u32> {
        self.metadata.as_ref().and_then(|m| m.seed)
    }

    pub fn init_image_path(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.init_image_path.as_deref())
    }
}

/// Which gallery collection an image belongs to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Result,
    User,
}

/// The generation parameters attached to a produced image.
///
/// Every field is optional: older servers omit most of them and uploads
/// carry none at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GenerationMetadata {
    #[serde(rename = "type", default)]
    pub kind: Option<ImageType>,
    #[serde(default)]
    pub prompt: Option<Prompt>,
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub sampler: Option<String>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub cfg_scale: Option<f32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub threshold: Option<f32>,
    #[serde(default)]
    pub perlin: Option<f32>,
    #[serde(default)]
    pub seamless: Option<bool>,
    #[serde(default)]
    pub hires_fix: Option<bool>,
    /// Seed/weight pairs the image was varied with
    #[serde(default)]
    pub variations: Vec<SeedWeight>,
    /// img2img strength
    #[serde(default)]
    pub strength: Option<f32>,
    /// img2img fit-to-width-height
    #[serde(default)]
    pub fit: Option<bool>,
    /// Path of the source image for img2img results
    #[serde(default)]
    pub init_image_path: Option<String>,
    #[serde(default)]
    pub postprocessing: Vec<PostprocessStep>,
}

/// Generation type tag. Unknown tags are preserved verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ImageType {
    TextToImage,
    ImageToImage,
    Other(String),
}

impl ImageType {
    /// Only txt2img and img2img results carry a complete parameter bundle
    pub fn has_full_parameters(&self) -> bool {
        matches!(self, ImageType::TextToImage | ImageType::ImageToImage)
    }
}

impl From<String> for ImageType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "txt2img" => ImageType::TextToImage,
            "img2img" => ImageType::ImageToImage,
            _ => ImageType::Other(tag),
        }
    }
}

impl From<ImageType> for String {
    fn from(kind: ImageType) -> Self {
        match kind {
            ImageType::TextToImage => "txt2img".to_string(),
            ImageType::ImageToImage => "img2img".to_string(),
            ImageType::Other(tag) => tag,
        }
    }
}

/// A prompt as stored in metadata: either the raw text or a list of
/// weighted sub-prompts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Prompt {
    Text(String),
    Weighted(Vec<WeightedPrompt>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightedPrompt {
    pub prompt: String,
    pub weight: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeedWeight {
    pub seed: u32,
    pub weight: f32,
}

/// One postprocessing pass recorded on an image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostprocessStep {
    /// "esrgan", "gfpgan" or "codeformer"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub strength: Option<f32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub fidelity: Option<f32>,
}

/// Top-level application tabs
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    TextToImage,
    ImageToImage,
    UnifiedCanvas,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::TextToImage, Tab::ImageToImage, Tab::UnifiedCanvas];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::TextToImage => "Text To Image",
            Tab::ImageToImage => "Image To Image",
            Tab::UnifiedCanvas => "Unified Canvas",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_gallery_record() {
        let json = r#"{
            "uuid": "a1",
            "url": "outputs/a1.png",
            "thumbnail": "outputs/thumbnails/a1.webp",
            "mtime": 1700000000,
            "width": 512,
            "height": 512,
            "metadata": {
                "type": "img2img",
                "prompt": [{"prompt": "a cat", "weight": 1.0}],
                "seed": 42,
                "init_image_path": "outputs/init-images/a0.png",
                "variations": [{"seed": 7, "weight": 0.1}]
            }
        }"#;

        let image: Image = serde_json::from_str(json).unwrap();

        assert_eq!(image.thumbnail_url(), "outputs/thumbnails/a1.webp");
        assert_eq!(image.category, Category::Result);
        assert_eq!(image.image_type(), Some(&ImageType::ImageToImage));
        assert_eq!(image.seed(), Some(42));
        assert_eq!(image.init_image_path(), Some("outputs/init-images/a0.png"));
        assert!(matches!(image.prompt(), Some(Prompt::Weighted(p)) if p.len() == 1));
    }

    #[test]
    fn test_record_without_metadata() {
        let image: Image =
            serde_json::from_str(r#"{"uuid": "u", "url": "x.png", "category": "user"}"#).unwrap();

        assert_eq!(image.thumbnail_url(), "x.png");
        assert_eq!(image.category, Category::User);
        assert!(image.seed().is_none());
        assert!(image.prompt().is_none());
        assert!(image.image_type().is_none());
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let meta: GenerationMetadata = serde_json::from_str(r#"{"type": "esrgan"}"#).unwrap();

        assert_eq!(meta.kind, Some(ImageType::Other("esrgan".to_string())));
        assert!(!meta.kind.unwrap().has_full_parameters());
        assert!(ImageType::TextToImage.has_full_parameters());
        assert!(ImageType::ImageToImage.has_full_parameters());
    }
}
