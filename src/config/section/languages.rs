//! `[languages]` section: which fence tags are transcripts and which are code.

use serde::{Deserialize, Serialize};

use crate::lab::Languages;
use crate::lab::fence::{CODE_LANGS, TERMINAL_LANGS};

/// Fence tag sets. Tags in neither set render as markdown.
///
/// # Example
///
/// ```toml
/// [languages]
/// terminal = ["bash", "sh", "zsh", "fish"]
/// code = ["python", "rust", "toml"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    pub terminal: Vec<String>,
    pub code: Vec<String>,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            terminal: TERMINAL_LANGS.iter().map(ToString::to_string).collect(),
            code: CODE_LANGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LanguagesConfig {
    /// Classifier built from these sets.
    pub fn to_languages(&self) -> Languages {
        Languages::new(&self.terminal, &self.code)
    }

    pub fn validate(&self, errors: &mut Vec<String>) {
        let languages = self.to_languages();
        let overlap = languages.overlap();
        if !overlap.is_empty() {
            errors.push(format!(
                "languages.terminal and languages.code overlap: {}",
                overlap.join(", ")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::LangClass;

    #[test]
    fn test_defaults_classify() {
        let languages = LanguagesConfig::default().to_languages();
        assert_eq!(languages.classify(Some("powershell")), LangClass::Terminal);
        assert_eq!(languages.classify(Some("SQL")), LangClass::Code);
        assert_eq!(languages.classify(Some("toml")), LangClass::Markdown);
    }

    #[test]
    fn test_overlap_rejected() {
        let config = LanguagesConfig {
            terminal: vec!["bash".into(), "Python".into()],
            code: vec!["python".into()],
        };
        let mut errors = Vec::new();
        config.validate(&mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("python"));
    }
}
