//! `[content]` section: where labs live and how they are addressed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content root and index file settings.
///
/// # Example
///
/// ```toml
/// [content]
/// root = "public/labs"
/// url_prefix = "labs"
/// summary_file = "labs.json"
/// index_file = "index.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root, relative to the config file.
    pub root: PathBuf,
    /// First URL segment of embeds, posters and `mdPath`.
    pub url_prefix: String,
    /// Aggregate summaries, written inside the root.
    pub summary_file: String,
    /// Slug list, written inside the root.
    pub index_file: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "public/labs".into(),
            url_prefix: "labs".into(),
            summary_file: "labs.json".into(),
            index_file: "index.json".into(),
        }
    }
}

impl ContentConfig {
    /// Collect validation problems into `errors`.
    pub fn validate(&self, errors: &mut Vec<String>) {
        let prefix = self.url_prefix.trim();
        if prefix.is_empty() {
            errors.push("content.url_prefix must not be empty".into());
        } else if prefix.starts_with('/') || prefix.ends_with('/') {
            errors.push(format!(
                "content.url_prefix `{}` must not start or end with `/`",
                self.url_prefix
            ));
        }

        for (field, name) in [("summary_file", &self.summary_file), ("index_file", &self.index_file)] {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                errors.push(format!("content.{field} `{name}` must be a plain file name"));
            }
        }

        if self.summary_file == self.index_file {
            errors.push("content.summary_file and content.index_file must differ".into());
        }
    }
}
