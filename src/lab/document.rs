//! Loading lab documents from the content root.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors loading a single lab. Non-fatal to listings.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("invalid lab slug `{0}`")]
    InvalidSlug(String),

    #[error("cannot read `{}`", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is an HTML page, not a lab document", path.display())]
    NotMarkdown { path: PathBuf },
}

/// Raw lab text and where it came from.
#[derive(Debug, Clone)]
pub struct LabDocument {
    pub slug: String,
    pub path: PathBuf,
    pub text: String,
}

impl LabDocument {
    /// Load `<root>/<slug>/<slug>.md`, or the first markdown file in the
    /// lab folder when the file is named differently.
    pub fn load(root: &Path, slug: &str) -> Result<Self, LabError> {
        validate_slug(slug)?;
        let dir = root.join(slug);
        let path = dir.join(format!("{slug}.md"));
        let path = if path.is_file() {
            path
        } else {
            first_markdown(&dir).unwrap_or(path)
        };
        Self::from_path(slug, path)
    }

    /// Load a document from an explicit path.
    pub fn from_path(slug: &str, path: PathBuf) -> Result<Self, LabError> {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(LabError::Unreadable { path, source }),
        };

        if looks_like_html(&text) {
            return Err(LabError::NotMarkdown { path });
        }

        Ok(Self {
            slug: slug.to_string(),
            path,
            text,
        })
    }
}

fn first_markdown(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md") && path.is_file())
        .min()
}

/// Static hosts answer missing files with their HTML shell.
fn looks_like_html(text: &str) -> bool {
    let head = text.trim_start_matches('\u{feff}').trim_start();
    head.get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!doctype"))
}

fn validate_slug(slug: &str) -> Result<(), LabError> {
    let bad = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\'])
        || slug.contains('\0');
    if bad {
        return Err(LabError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
