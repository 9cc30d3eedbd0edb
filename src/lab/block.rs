//! Content assembly: body text to an ordered sequence of typed blocks.

use std::ops::Range;

use serde::Serialize;

use super::fence::{LangClass, Languages, scan_fences};
use super::transcript::{TranscriptEntry, parse_transcript};

/// Render-ready content of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    /// Markdown text, rendered by the external markdown renderer.
    #[serde(rename = "md")]
    Markdown { text: String },
    /// Parsed terminal transcript (never empty).
    #[serde(rename = "term")]
    Terminal { entries: Vec<TranscriptEntry> },
    /// Code to highlight with the declared language.
    #[serde(rename = "code")]
    Code { lang: String, code: String },
}

/// A block and the byte range of the body it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(skip)]
    pub span: Range<usize>,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    fn markdown(body: &str, span: Range<usize>) -> Self {
        let text = body[span.clone()].to_string();
        Self {
            span,
            content: BlockContent::Markdown { text },
        }
    }
}

/// Split `body` into blocks in source order.
///
/// Text outside fences becomes markdown blocks verbatim. Terminal fences with
/// no entries produce no block.
pub fn assemble(body: &str, languages: &Languages) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for fence in scan_fences(body) {
        if fence.span.start > last {
            blocks.push(Block::markdown(body, last..fence.span.start));
        }
        last = fence.span.end;

        let content = match languages.classify(fence.tag) {
            LangClass::Terminal => {
                let entries = parse_transcript(fence.content);
                if entries.is_empty() {
                    continue;
                }
                BlockContent::Terminal { entries }
            }
            LangClass::Code => BlockContent::Code {
                lang: fence.tag.unwrap_or_default().to_ascii_lowercase(),
                code: trim_code(fence.content).to_string(),
            },
            LangClass::Markdown => BlockContent::Markdown {
                text: fence.content.to_string(),
            },
        };

        blocks.push(Block {
            span: fence.span,
            content,
        });
    }

    if last < body.len() {
        blocks.push(Block::markdown(body, last..body.len()));
    }

    blocks
}

/// Drop leading blank lines and trailing whitespace, keeping the indentation
/// of the first code line.
fn trim_code(code: &str) -> &str {
    let mut start = 0;
    for line in code.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    code[start..].trim_end()
}
