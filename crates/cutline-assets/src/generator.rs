//! The asset generator boundary.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{AssetError, AssetResult};

/// Turns a text prompt into an image reference the preview can display.
pub trait AssetGenerator: Send + Sync + 'static {
    /// Produce one image URL (remote or `data:`) for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = AssetResult<String>> + Send;

    /// Produce a raw JSON scene list for a short script about `topic`.
    fn write_script(&self, _topic: &str) -> impl Future<Output = AssetResult<String>> + Send {
        async { Ok("[]".to_string()) }
    }
}

/// Base64 payload with its MIME type, as returned inline by image backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// `data:<mime>;base64,<data>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// One part of a generator response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponsePart {
    Text(String),
    InlineData(InlineData),
}

/// Data URL of the first inline image part.
pub fn image_data_url(parts: &[ResponsePart]) -> AssetResult<String> {
    parts
        .iter()
        .find_map(|part| match part {
            ResponsePart::InlineData(inline) if inline.is_image() => Some(inline.to_data_url()),
            _ => None,
        })
        .ok_or(AssetError::NoImage)
}

/// Stock photos offered when no generation backend is configured.
pub const STOCK_IMAGES: &[&str] = &[
    "https://images.pexels.com/photos/20857398/pexels-photo-20857398.jpeg",
    "https://images.pexels.com/photos/17650537/pexels-photo-17650537.jpeg",
];

/// Offline generator cycling through [`STOCK_IMAGES`]. Scripts follow a
/// fixed three-scene outline.
#[derive(Debug, Default)]
pub struct StockGenerator {
    next: AtomicUsize,
}

impl StockGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetGenerator for StockGenerator {
    async fn generate(&self, _prompt: &str) -> AssetResult<String> {
        let i = self.next.fetch_add(1, Ordering::Relaxed) % STOCK_IMAGES.len();
        Ok(STOCK_IMAGES[i].to_string())
    }

    async fn write_script(&self, topic: &str) -> AssetResult<String> {
        let scenes = serde_json::json!([
            { "time": "0-5s", "description": format!("Open wide on {topic}") },
            { "time": "5-20s", "description": format!("Close-ups of {topic} in motion") },
            { "time": "20-30s", "description": "Title card and call to action" },
        ]);
        Ok(scenes.to_string())
    }
}
