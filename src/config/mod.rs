//! Configuration management for `labkit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build], [build.slug]
//! │   ├── content    # [content]
//! │   ├── languages  # [languages]
//! │   └── render     # [render]
//! ├── error          # ConfigError
//! ├── util           # find_config_file
//! └── mod.rs         # LabConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[content]`    | Content root, URL prefix, index file names       |
//! | `[build.slug]` | Slug derivation mode                             |
//! | `[languages]`  | Terminal and code fence tags                     |
//! | `[render]`     | Display fallbacks for the render view            |
//!
//! The file is optional. Without it every section takes its defaults and
//! paths resolve against the working directory.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BuildSectionConfig, ContentConfig, LanguagesConfig, RenderConfig, SlugConfig};

use util::find_config_file;

use crate::{cli::Cli, debug, lab::Languages, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing labkit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Content root and index files
    pub content: ContentConfig,

    /// Build settings
    pub build: BuildSectionConfig,

    /// Fence language sets
    pub languages: LanguagesConfig,

    /// Render fallbacks
    pub render: RenderConfig,
}

impl LabConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. `content.root` is
    /// resolved against the config file's directory, `--root` against cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let base = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.clone(), Path::to_path_buf);
        config.content.root = base.join(&config.content.root);

        if let Some(root) = &cli.root {
            config.content.root = cwd.join(root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.content.validate(&mut errors);
        self.languages.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Content root directory.
    pub fn content_root(&self) -> &Path {
        &self.content.root
    }

    /// URL prefix without surrounding whitespace.
    pub fn url_prefix(&self) -> &str {
        self.content.url_prefix.trim()
    }

    pub fn summary_path(&self) -> PathBuf {
        self.content.root.join(&self.content.summary_file)
    }

    pub fn index_path(&self) -> PathBuf {
        self.content.root.join(&self.content.index_file)
    }

    /// Fence classifier for the configured language sets.
    pub fn languages(&self) -> Languages {
        self.languages.to_languages()
    }
}

// ============================================================================
// tests
// ============================================================================
