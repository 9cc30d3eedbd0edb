//! `labkit list`: lab cards from the slug index.

use std::fs;

use anyhow::{Context, Result};

use super::OutputArgs;
use super::common::write_output;
use crate::config::LabConfig;
use crate::lab::{LabCard, LabDocument, frontmatter};
use crate::log;
use crate::utils::plural_count;

/// Read the slug index and build a card per lab.
///
/// Labs that fail to load are logged and left out.
pub fn list_labs(config: &LabConfig, tag: Option<&str>) -> Result<Vec<LabCard>> {
    let index_path = config.index_path();
    let content = fs::read_to_string(&index_path)
        .with_context(|| format!("cannot read slug index `{}` (run `labkit build` first)", index_path.display()))?;
    let slugs: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("`{}` is not a JSON array of slugs", index_path.display()))?;

    let mut failed = 0;
    let cards: Vec<LabCard> = slugs
        .iter()
        .filter_map(|slug| match LabDocument::load(config.content_root(), slug) {
            Ok(doc) => Some(LabCard::new(&doc.slug, &frontmatter::extract(&doc.text).meta)),
            Err(e) => {
                log!("list"; "skipping {}: {}", slug, e);
                failed += 1;
                None
            }
        })
        .filter(|card| tag.is_none_or(|tag| card.has_tag(tag)))
        .collect();

    if failed > 0 {
        log!("warning"; "{} could not be loaded", plural_count(failed, "lab"));
    }

    Ok(cards)
}

/// Execute list command
pub fn run_list(config: &LabConfig, tag: Option<&str>, args: &OutputArgs) -> Result<()> {
    let cards = list_labs(config, tag)?;
    write_output(&cards, args, "list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LabConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for (slug, text) in [
            ("lame", "---\ntitle: Lame\nsummary: SMB\ntags: [smb, linux]\n---\nbody"),
            ("sau", "---\ntags: web\nos: Linux\n---\nbody"),
            ("spa", "<!DOCTYPE html><html></html>"),
        ] {
            fs::create_dir_all(root.join(slug)).unwrap();
            fs::write(root.join(slug).join(format!("{slug}.md")), text).unwrap();
        }
        fs::write(root.join("index.json"), r#"["lame", "sau", "spa", "ghost"]"#).unwrap();

        let mut config = LabConfig::default();
        config.content.root = root.to_path_buf();
        (dir, config)
    }

    #[test]
    fn test_list_skips_failures() {
        let (_dir, config) = setup();
        let cards = list_labs(&config, None).unwrap();
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].title, "Lame");
        assert_eq!(cards[0].summary, "SMB");
        assert_eq!(cards[1].slug, "sau");
        assert_eq!(cards[1].title, "sau");
        assert_eq!(cards[1].summary, "");
        assert_eq!(cards[1].tags, vec!["web"]);
        assert_eq!(cards[1].os.as_deref(), Some("Linux"));
    }

    #[test]
    fn test_list_filters_by_tag() {
        let (_dir, config) = setup();
        let cards = list_labs(&config, Some("WEB")).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].slug, "sau");
    }

    #[test]
    fn test_missing_index_is_error() {
        let dir = TempDir::new().unwrap();
        let mut config = LabConfig::default();
        config.content.root = dir.path().to_path_buf();
        assert!(list_labs(&config, None).is_err());
    }
}
