//! Fenced region scanning and language classification.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Triple-backtick fence with an optional tag on the opening line.
///
/// The content is matched lazily, so the next triple backtick always closes
/// the fence and fences never nest.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_-]+)?\r?\n(.*?)```").expect("valid fence pattern")
});

/// Default shell-family tags rendered as terminal transcripts.
pub const TERMINAL_LANGS: &[&str] = &["cmd", "bash", "sh", "zsh", "shell", "ps", "powershell"];

/// Default tags rendered as highlighted code.
pub const CODE_LANGS: &[&str] = &[
    "python",
    "js",
    "javascript",
    "typescript",
    "java",
    "c",
    "cpp",
    "go",
    "rust",
    "php",
    "html",
    "css",
    "json",
    "yaml",
    "yml",
    "sql",
];

/// How a fence is rendered, decided by its language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangClass {
    Terminal,
    Code,
    Markdown,
}

/// The two language sets consulted by [`Languages::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages {
    terminal: BTreeSet<String>,
    code: BTreeSet<String>,
}

impl Default for Languages {
    fn default() -> Self {
        Self::new(TERMINAL_LANGS, CODE_LANGS)
    }
}

impl Languages {
    /// Build from tag lists. Tags are lowercased.
    pub fn new<T, C>(terminal: T, code: C) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let lower = |s: &str| s.trim().to_ascii_lowercase();
        Self {
            terminal: terminal.into_iter().map(|s| lower(s.as_ref())).collect(),
            code: code.into_iter().map(|s| lower(s.as_ref())).collect(),
        }
    }

    /// Classify a fence tag. Terminal set first, then code; anything else,
    /// including a missing tag, is markdown.
    pub fn classify(&self, tag: Option<&str>) -> LangClass {
        let Some(tag) = tag else {
            return LangClass::Markdown;
        };
        let tag = tag.to_ascii_lowercase();
        if self.terminal.contains(&tag) {
            LangClass::Terminal
        } else if self.code.contains(&tag) {
            LangClass::Code
        } else {
            LangClass::Markdown
        }
    }

    /// Tags present in both sets.
    pub fn overlap(&self) -> Vec<&str> {
        self.terminal
            .intersection(&self.code)
            .map(String::as_str)
            .collect()
    }
}

/// A fenced region located in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Byte range of the whole fence, backticks included.
    pub span: Range<usize>,
    /// Declared tag as written.
    pub tag: Option<&'a str>,
    /// Text between the opening line and the closing backticks.
    pub content: &'a str,
}

/// Scan `body` left to right for fenced regions.
pub fn scan_fences(body: &str) -> impl Iterator<Item = Fence<'_>> {
    FENCE.captures_iter(body).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(Fence {
            span: whole.range(),
            tag: caps.get(1).map(|m| m.as_str()),
            content: caps.get(2).map_or("", |m| m.as_str()),
        })
    })
}
