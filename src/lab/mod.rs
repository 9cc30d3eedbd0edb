//! Lab content pipeline.
//!
//! ```text
//! raw text ─► frontmatter ─► (LabMeta, body)
//!                               │
//!                               ▼
//!                             embed      ![[x.png]] → ![x.png](/labs/<slug>/x.png)
//!                               │
//!                               ▼
//!                   fence + transcript ─► block::assemble ─► Vec<Block>
//! ```
//!
//! `normalize` and `summary` are the build-time half: canonical rewrite of
//! the file and its record in the aggregate index. `view` applies display
//! fallbacks for the renderer.

pub mod block;
pub mod document;
pub mod embed;
pub mod fence;
pub mod frontmatter;
pub mod meta;
pub mod normalize;
pub mod slug;
pub mod summary;
pub mod transcript;
pub mod view;

pub use block::{Block, BlockContent, assemble};
pub use document::{LabDocument, LabError};
pub use fence::{LangClass, Languages};
pub use frontmatter::{FrontMatter, Header};
pub use meta::LabMeta;
pub use slug::SlugMode;
pub use summary::LabSummary;
pub use transcript::TranscriptEntry;
pub use view::{LabCard, LabView};

/// A lab run through the whole runtime pipeline.
#[derive(Debug, Clone)]
pub struct ParsedLab {
    pub header: Header,
    pub meta: LabMeta,
    /// Body after embed rewriting; block spans index into it.
    pub body: String,
    pub blocks: Vec<Block>,
}

/// Extract front-matter, rewrite embeds and assemble blocks.
pub fn parse_lab(text: &str, slug: &str, url_prefix: &str, languages: &Languages) -> ParsedLab {
    let FrontMatter { header, meta, body } = frontmatter::extract(text);
    let body = embed::rewrite_embeds(body, url_prefix, slug).into_owned();
    let blocks = assemble(&body, languages);
    ParsedLab {
        header,
        meta,
        body,
        blocks,
    }
}
