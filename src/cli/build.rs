//! Build-time normalization of the content root.
//!
//! Pipeline:
//! - **Collect** - `<root>/<folder>/*.md`, sorted by path
//! - **Normalize** - parallel: canonical rewrite of each file, summary record
//! - **Index** - sequential: `labs.json` and `index.json`, written once
//!
//! Per-file failures are collected during the parallel phase and the first
//! one aborts the build before any index is written.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use rayon::prelude::*;

use super::common::write_json_file;
use crate::config::LabConfig;
use crate::lab::LabSummary;
use crate::lab::normalize::{Outcome, normalize};
use crate::lab::slug::derive_slug;
use crate::logger::ProgressLine;
use crate::utils::plural_count;
use crate::{debug, log};

/// What happened to a single lab file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Rewritten,
    Unchanged,
    /// Malformed front-matter, left untouched.
    Skipped,
}

/// Per-file build result.
#[derive(Debug, Clone)]
struct LabOutcome {
    folder: String,
    status: FileStatus,
    summary: LabSummary,
}

/// Totals of a build run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub rewritten: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub summaries: Vec<LabSummary>,
    /// Lab folders, in path order, as written to the slug index.
    pub index: Vec<String>,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.summaries.len()
    }
}

/// Normalize every lab under the content root and write the indexes.
///
/// With `dry_run` nothing is written.
pub fn build_labs(config: &LabConfig, dry_run: bool) -> Result<BuildReport> {
    let root = config.content_root();
    fs::read_dir(root).with_context(|| format!("cannot read content root `{}`", root.display()))?;

    let files = collect_lab_files(root)?;
    debug!("build"; "found {} under {}", plural_count(files.len(), "lab file"), root.display());

    let progress = ProgressLine::new("labs", files.len());
    let results: Vec<Result<LabOutcome>> = files
        .par_iter()
        .map(|path| {
            let result = process_lab(path, config, dry_run);
            progress.inc();
            result
        })
        .collect();
    progress.finish();

    let outcomes = results.into_iter().collect::<Result<Vec<_>>>()?;
    let report = collect_report(outcomes);

    warn_duplicate_slugs(&report.summaries);

    if dry_run {
        log!(
            "build"; "dry run: {} would be rewritten, nothing written",
            plural_count(report.rewritten, "lab")
        );
    } else {
        write_json_file(&config.summary_path(), &report.summaries)?;
        write_json_file(&config.index_path(), &report.index)?;
        log!(
            "build"; "{} indexed ({} rewritten, {} unchanged)",
            plural_count(report.total(), "lab"),
            report.rewritten,
            report.unchanged
        );
    }

    if report.skipped > 0 {
        log!("warning"; "{} left untouched due to malformed front-matter", plural_count(report.skipped, "file"));
    }

    Ok(report)
}

/// Markdown files exactly one folder below the root, in path order.
/// Hidden folders and files are ignored. A folder that cannot be walked
/// fails the build.
fn collect_lab_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).skip_hidden(false).max_depth(2) {
        let entry = entry.with_context(|| format!("cannot walk content root `{}`", root.display()))?;
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md")
            && !is_hidden(&path)
            && !path.parent().is_some_and(is_hidden)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn process_lab(path: &Path, config: &LabConfig, dry_run: bool) -> Result<LabOutcome> {
    let folder = file_name(path.parent().unwrap_or(path));
    let name = file_name(path);

    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read `{}`", path.display()))?;
    let normalized = normalize(&content, config.url_prefix(), &folder)
        .with_context(|| format!("cannot serialize front-matter of `{}`", path.display()))?;

    let status = match normalized.outcome {
        Outcome::Rewritten(text) => {
            if !dry_run {
                fs::write(path, text).with_context(|| format!("cannot write `{}`", path.display()))?;
            }
            debug!("build"; "normalized {}/{}", folder, name);
            FileStatus::Rewritten
        }
        Outcome::Unchanged => FileStatus::Unchanged,
        Outcome::Skipped(reason) => {
            log!("warning"; "{}/{}: malformed front-matter, not rewritten: {}", folder, name, reason);
            FileStatus::Skipped
        }
    };

    let slug = derive_slug(&normalized.meta, &folder, config.build.slug.mode);
    let summary = LabSummary::new(&normalized.meta, slug, config.url_prefix(), &folder, &name);

    Ok(LabOutcome {
        folder,
        status,
        summary,
    })
}

fn collect_report(outcomes: Vec<LabOutcome>) -> BuildReport {
    let mut report = BuildReport::default();
    for outcome in outcomes {
        match outcome.status {
            FileStatus::Rewritten => report.rewritten += 1,
            FileStatus::Unchanged => report.unchanged += 1,
            FileStatus::Skipped => report.skipped += 1,
        }
        if report.index.last() != Some(&outcome.folder) {
            report.index.push(outcome.folder);
        }
        report.summaries.push(outcome.summary);
    }
    report
}

fn warn_duplicate_slugs(summaries: &[LabSummary]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for summary in summaries {
        *seen.entry(summary.slug.as_str()).or_default() += 1;
    }
    let mut duplicates: Vec<_> = seen.into_iter().filter(|&(_, n)| n > 1).collect();
    duplicates.sort_unstable();
    for (slug, count) in duplicates {
        log!("warning"; "slug `{}` is used by {} labs", slug, count);
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::frontmatter::extract;
    use crate::utils::hash::fingerprint;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn setup(labs: &[(&str, &str, &str)]) -> (TempDir, LabConfig) {
        let dir = TempDir::new().unwrap();
        for (folder, name, text) in labs {
            let lab = dir.path().join(folder);
            fs::create_dir_all(&lab).unwrap();
            fs::write(lab.join(name), text).unwrap();
        }
        let mut config = LabConfig::default();
        config.content.root = dir.path().to_path_buf();
        (dir, config)
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_normalizes_and_indexes() {
        let (dir, config) = setup(&[
            (
                "lame",
                "lame.md",
                "---\ntitle: HTB Lame\ndifficulty: Easy\ntags: [smb, cve]\nscreenshots: [poster.png]\n---\nIntro\n![[poster.png|Poster]]\n",
            ),
            ("blue", "blue.md", "No header at all"),
        ]);

        let report = build_labs(&config, false).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.rewritten, 2);
        assert_eq!(report.index, vec!["blue", "lame"]);

        let lame = fs::read_to_string(dir.path().join("lame/lame.md")).unwrap();
        assert!(lame.starts_with("---\n"));
        assert!(lame.contains("![poster.png](/labs/lame/poster.png)"));
        let fm = extract(&lame);
        assert_eq!(fm.meta.normalized, Some(fingerprint(fm.body)));

        let summaries = read_json(&config.summary_path());
        assert_eq!(
            summaries,
            json!([
                {
                    "slug": "blue",
                    "tags": [],
                    "poster": null,
                    "mdPath": "/labs/blue/blue.md"
                },
                {
                    "title": "HTB Lame",
                    "slug": "htb-lame",
                    "difficulty": "Easy",
                    "tags": ["smb", "cve"],
                    "poster": "/labs/lame/poster.png",
                    "mdPath": "/labs/lame/lame.md"
                }
            ])
        );
        assert_eq!(read_json(&config.index_path()), json!(["blue", "lame"]));
    }

    #[test]
    fn test_rebuild_is_stable() {
        let (dir, config) = setup(&[("sau", "sau.md", "---\ntitle: Sau\n---\n![[a.png]]")]);

        build_labs(&config, false).unwrap();
        let first = fs::read_to_string(dir.path().join("sau/sau.md")).unwrap();

        let report = build_labs(&config, false).unwrap();
        assert_eq!(report.rewritten, 0);
        assert_eq!(report.unchanged, 1);
        let second = fs::read_to_string(dir.path().join("sau/sau.md")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_header_untouched_but_summarized() {
        let text = "---\ntitle: [broken\n---\n![[a.png]]";
        let (dir, config) = setup(&[("bad", "bad.md", text)]);

        let report = build_labs(&config, false).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(fs::read_to_string(dir.path().join("bad/bad.md")).unwrap(), text);
        assert_eq!(report.summaries[0].slug, "bad");
        assert_eq!(report.summaries[0].title, None);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let text = "---\ntitle: Dry\n---\n![[a.png]]";
        let (dir, config) = setup(&[("dry", "dry.md", text)]);

        let report = build_labs(&config, true).unwrap();
        assert_eq!(report.rewritten, 1);
        assert_eq!(fs::read_to_string(dir.path().join("dry/dry.md")).unwrap(), text);
        assert!(!config.summary_path().exists());
        assert!(!config.index_path().exists());
    }

    #[test]
    fn test_only_folder_markdown_collected() {
        let (dir, _config) = setup(&[
            ("a", "a.md", "a"),
            ("a", "notes.txt", "x"),
            ("b", "b.md", "b"),
        ]);
        fs::write(dir.path().join("top.md"), "stray").unwrap();
        fs::create_dir_all(dir.path().join("a/deep")).unwrap();
        fs::write(dir.path().join("a/deep/d.md"), "deep").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/x.md"), "hidden").unwrap();

        let files = collect_lab_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_unreadable_lab_aborts_before_indexes() {
        let (dir, config) = setup(&[("good", "good.md", "---\ntitle: Good\n---\nok")]);
        let bad = dir.path().join("bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let err = build_labs(&config, false).unwrap_err();
        assert!(format!("{err:#}").contains("bad.md"));
        assert!(!config.summary_path().exists());
        assert!(!config.index_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unwalkable_folder_fails() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, config) = setup(&[("open", "open.md", "a"), ("locked", "locked.md", "b")]);
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through the mode bits; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let walked = collect_lab_files(dir.path());
        let built = build_labs(&config, false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(walked.is_err());
        assert!(built.is_err());
        assert!(!config.summary_path().exists());
        assert!(!config.index_path().exists());
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = LabConfig::default();
        config.content.root = dir.path().join("nope");
        assert!(build_labs(&config, false).is_err());
    }

    #[test]
    fn test_transliterated_slug() {
        let (_dir, mut config) = setup(&[("cafe", "cafe.md", "---\ntitle: Café Noir\n---\n")]);
        config.build.slug.mode = crate::lab::SlugMode::Transliterate;
        let report = build_labs(&config, true).unwrap();
        assert_eq!(report.summaries[0].slug, "cafe-noir");
    }
}
