//! `[render]` section: display fallbacks for `labkit render`.

use serde::{Deserialize, Serialize};

/// Text shown where a lab leaves a field unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Missing date, difficulty or OS.
    pub placeholder: String,
    /// Prompt parts for transcript entries without a parsed prompt.
    pub prompt_user: String,
    pub prompt_machine: String,
    pub prompt_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "—".into(),
            prompt_user: "user".into(),
            prompt_machine: "lab".into(),
            prompt_path: "~".into(),
        }
    }
}
