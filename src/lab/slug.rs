//! Slug derivation for lab identifiers.

use serde::{Deserialize, Serialize};

use super::LabMeta;
use super::meta::non_empty;

/// How non-ASCII text is treated before slugifying.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Anything outside `a-z0-9` is a separator (default).
    #[default]
    Ascii,
    /// Transliterate Unicode to ASCII first (`Café` → `cafe`).
    Transliterate,
}

/// Lowercase, collapse every run of non-`[a-z0-9]` into one `-`, and trim
/// hyphens from both ends.
pub fn slugify(text: &str, mode: SlugMode) -> String {
    let source = match mode {
        SlugMode::Ascii => text.to_lowercase(),
        SlugMode::Transliterate => deunicode::deunicode(text).to_lowercase(),
    };

    let mut slug = String::with_capacity(source.len());
    let mut pending_dash = false;
    for ch in source.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug for a lab: explicit `slug`, else the slugified title, else the
/// slugified folder name.
pub fn derive_slug(meta: &LabMeta, folder: &str, mode: SlugMode) -> String {
    if let Some(slug) = meta.slug() {
        return slug.to_string();
    }
    meta.title()
        .map(|title| slugify(title, mode))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(folder, mode))
}
