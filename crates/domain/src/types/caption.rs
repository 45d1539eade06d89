//! Caption generation requests and results

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Request body for `generateCaption`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub goal: String,
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// One normalized suggestion from the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CaptionCandidate {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl CaptionCandidate {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), hashtags: Vec::new() }
    }

    /// True when there is no caption text to apply.
    pub fn is_blank(&self) -> bool {
        self.caption.trim().is_empty()
    }

    /// Post body for this candidate: the caption, then a blank line and the
    /// hashtags (each `#`-prefixed) when there are any.
    pub fn to_post_content(&self) -> String {
        let caption = self.caption.trim();
        let tags: Vec<String> = self
            .hashtags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| if tag.starts_with('#') { tag.to_string() } else { format!("#{tag}") })
            .collect();

        if tags.is_empty() {
            caption.to_string()
        } else {
            format!("{caption}\n\n{}", tags.join(" "))
        }
    }
}

/// User request to rewrite one post's caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct RegenerateCaption {
    pub post_id: String,
    pub platform: String,
    pub goal: String,
    pub tone: String,
}

/// Request body for `optimizeCaption`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct OptimizeCaptionRequest {
    pub caption: String,
    pub platform: String,
    pub goal: String,
}

/// Request body for `repurposeContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct RepurposeRequest {
    pub content: String,
    pub source_platform: String,
    pub target_platforms: Vec<String>,
}
