//! `[build]` section and its `[build.slug]` sub-section.

use serde::{Deserialize, Serialize};

use crate::lab::SlugMode;

/// Build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Slug derivation.
    pub slug: SlugConfig,
}

/// `[build.slug]`
///
/// ```toml
/// [build.slug]
/// mode = "transliterate"   # ascii (default) | transliterate
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    pub mode: SlugMode,
}
