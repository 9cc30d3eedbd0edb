//! Display-ready records for the renderer: a full lab view and list cards.
//!
//! Parsing leaves missing metadata unset. The fallbacks the renderer shows
//! (placeholder text, slug as title, default prompt parts) are applied here
//! and nowhere else.

use serde::Serialize;

use super::block::{Block, BlockContent};
use super::embed::asset_url;
use super::meta::non_empty;
use super::transcript::TranscriptEntry;
use super::LabMeta;
use crate::config::RenderConfig;
use crate::utils::date::display_date;

/// Logo file assumed when the header names none.
const DEFAULT_LOGO: &str = "logo.png";

/// Everything the lab page needs, with fallbacks applied.
#[derive(Debug, Clone, Serialize)]
pub struct LabView {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub difficulty: String,
    pub os: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub logo: String,
    pub blocks: Vec<BlockContent>,
}

impl LabView {
    pub fn new(slug: &str, meta: &LabMeta, blocks: Vec<Block>, url_prefix: &str, render: &RenderConfig) -> Self {
        let text = |value: Option<&String>| {
            non_empty(value.map(String::as_str)).map_or_else(|| render.placeholder.clone(), str::to_string)
        };

        Self {
            slug: slug.to_string(),
            title: meta.title().unwrap_or(slug).to_string(),
            date: display_date(meta.date.as_deref(), &render.placeholder),
            difficulty: text(meta.difficulty.as_ref()),
            os: text(meta.os.as_ref()),
            summary: non_empty(meta.summary.as_deref()).map(str::to_string),
            tags: meta.tags.clone(),
            logo: logo_url(meta, slug, url_prefix),
            blocks: blocks
                .into_iter()
                .map(|block| with_prompt_fallbacks(block.content, render))
                .collect(),
        }
    }
}

/// Compact record for the lab listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabCard {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

impl LabCard {
    pub fn new(slug: &str, meta: &LabMeta) -> Self {
        let owned = |value: Option<&str>| non_empty(value).map(str::to_string);
        Self {
            slug: slug.to_string(),
            title: meta.title().unwrap_or(slug).to_string(),
            summary: owned(meta.summary.as_deref()).unwrap_or_default(),
            tags: meta.tags.clone(),
            difficulty: owned(meta.difficulty.as_deref()),
            os: owned(meta.os.as_deref()),
        }
    }

    /// Case-insensitive tag match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }
}

/// Absolute paths and URLs are kept; anything else is relative to the lab folder.
fn logo_url(meta: &LabMeta, slug: &str, url_prefix: &str) -> String {
    match non_empty(meta.logo.as_deref()) {
        Some(logo) if logo.starts_with('/') || logo.contains("://") => logo.to_string(),
        Some(logo) => asset_url(url_prefix, slug, logo),
        None => asset_url(url_prefix, slug, DEFAULT_LOGO),
    }
}

fn with_prompt_fallbacks(content: BlockContent, render: &RenderConfig) -> BlockContent {
    match content {
        BlockContent::Terminal { entries } => BlockContent::Terminal {
            entries: entries
                .into_iter()
                .map(|entry| {
                    if entry.has_prompt() {
                        return entry;
                    }
                    TranscriptEntry {
                        user: Some(render.prompt_user.clone()),
                        machine: Some(render.prompt_machine.clone()),
                        path: Some(render.prompt_path.clone()),
                        ..entry
                    }
                })
                .collect(),
        },
        other => other,
    }
}
