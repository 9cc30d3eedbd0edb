//! Terminal transcript parsing.
//!
//! A transcript fence mixes prompt lines of the form
//! `(<user>@<host>)-[<path>]$ <command>` with the output that follows them.
//!
//! ```text
//! (kali@box)-[~/htb]$ whoami      <- prompt: starts an entry
//! root                            <- output of that entry
//! (kali@box)-[~/htb]$ id          <- next entry
//! uid=0(root) gid=0(root)
//! ```
//!
//! Lines before the first prompt are kept as one bare entry with no prompt
//! context. Parsing never fails: every line is a prompt, an output line or
//! part of the bare entry.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Prompt line grammar: `(user@host)-[path]$ command`.
static PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([^@]+)@([^)]+)\)-\[([^\]]+)\]\$[ \t]*(.*)$").expect("valid prompt pattern")
});

/// One parsed shell interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl TranscriptEntry {
    /// Entry without prompt context (banner text, raw commands).
    pub fn bare(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Whether this entry came from a prompt line.
    pub fn has_prompt(&self) -> bool {
        self.user.is_some()
    }
}

/// Borrowed view of a matched prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub user: &'a str,
    pub machine: &'a str,
    pub path: &'a str,
    pub command: &'a str,
}

impl Prompt<'_> {
    fn into_entry(self, output: Option<String>) -> TranscriptEntry {
        TranscriptEntry {
            command: self.command.trim().to_string(),
            output,
            user: Some(self.user.to_string()),
            machine: Some(self.machine.to_string()),
            path: Some(self.path.to_string()),
        }
    }
}

/// Match a single physical line against the prompt grammar.
pub fn parse_prompt(line: &str) -> Option<Prompt<'_>> {
    let caps = PROMPT.captures(line)?;
    Some(Prompt {
        user: caps.get(1)?.as_str(),
        machine: caps.get(2)?.as_str(),
        path: caps.get(3)?.as_str(),
        command: caps.get(4).map_or("", |m| m.as_str()),
    })
}

/// Split fence content into transcript entries.
///
/// An empty fence yields no entries.
pub fn parse_transcript(content: &str) -> Vec<TranscriptEntry> {
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(prompt) = parse_prompt(lines[i]) {
            i += 1;
            let start = i;
            while i < lines.len() && parse_prompt(lines[i]).is_none() {
                i += 1;
            }
            let output = join_trimmed(&lines[start..i]);
            entries.push(prompt.into_entry(output));
        } else {
            let start = i;
            while i < lines.len() && parse_prompt(lines[i]).is_none() {
                i += 1;
            }
            if let Some(command) = join_trimmed(&lines[start..i]) {
                entries.push(TranscriptEntry::bare(command));
            }
        }
    }

    entries
}

/// Join lines with `\n` and trim; `None` when nothing is left.
fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
