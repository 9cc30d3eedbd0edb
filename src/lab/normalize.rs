//! Canonical form of a lab file, as written back by `labkit build`.
//!
//! ```text
//! ---
//! title: Lame
//! tags: [smb]
//! normalized: 3f9a1c2d8e7b6a50     <- fingerprint of the body below
//! ---
//!
//! body with embeds rewritten
//! ```
//!
//! The `normalized` marker lets a rerun skip files that were already
//! rewritten and not edited since.

use serde_yaml::{Mapping, Value};

use super::embed::{has_embeds, rewrite_embeds};
use super::frontmatter::{Header, extract};
use super::LabMeta;
use crate::utils::hash::fingerprint;

/// Front-matter key holding the body fingerprint.
pub const MARKER_KEY: &str = "normalized";

/// What normalization decided for one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Marker matches the body; nothing to write.
    Unchanged,
    /// New canonical text to write back.
    Rewritten(String),
    /// Header is malformed; the file must not be overwritten.
    Skipped(String),
}

/// Normalization result with the metadata the summary is built from.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub meta: LabMeta,
    pub outcome: Outcome,
}

/// Normalize one lab file whose embeds resolve under `/<url_prefix>/<slug>/`.
pub fn normalize(content: &str, url_prefix: &str, slug: &str) -> Result<Normalized, serde_yaml::Error> {
    let fm = extract(content);

    let mut mapping = match fm.header {
        Header::Malformed(reason) => {
            return Ok(Normalized {
                meta: fm.meta,
                outcome: Outcome::Skipped(reason),
            });
        }
        Header::Parsed(mapping) => mapping,
        Header::Absent => Mapping::new(),
    };

    if fm.meta.normalized.as_deref() == Some(fingerprint(fm.body).as_str()) && !has_embeds(fm.body) {
        return Ok(Normalized {
            meta: fm.meta,
            outcome: Outcome::Unchanged,
        });
    }

    // Extraction drops blank lines after the header; a header-less body
    // still has them and must hash the way it will read back.
    let body = fm.body.trim_start_matches(['\r', '\n']);
    let body = rewrite_embeds(body, url_prefix, slug);
    mapping.insert(
        Value::String(MARKER_KEY.to_string()),
        Value::String(fingerprint(body.as_ref())),
    );

    let text = canonical(&mapping, &body)?;
    Ok(Normalized {
        meta: LabMeta::from_mapping(&mapping),
        outcome: Outcome::Rewritten(text),
    })
}

/// Render `---\n<yaml>---\n\n<body>`.
pub fn canonical(mapping: &Mapping, body: &str) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(mapping)?;
    Ok(format!("---\n{yaml}---\n\n{body}"))
}
