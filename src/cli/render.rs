//! `labkit render`: one lab as render-ready JSON.

use anyhow::Result;

use super::OutputArgs;
use super::common::write_output;
use crate::config::LabConfig;
use crate::lab::{LabDocument, LabView, parse_lab};
use crate::utils::plural_count;
use crate::debug;

/// Load, parse and assemble a lab into its display view.
pub fn render_lab(config: &LabConfig, slug: &str) -> Result<LabView> {
    let doc = LabDocument::load(config.content_root(), slug)?;
    let lab = parse_lab(&doc.text, &doc.slug, config.url_prefix(), &config.languages());

    if lab.header.is_malformed() {
        debug!("render"; "{}: malformed front-matter, metadata ignored", doc.path.display());
    }
    debug!("render"; "{}: {}", slug, plural_count(lab.blocks.len(), "block"));

    Ok(LabView::new(&doc.slug, &lab.meta, lab.blocks, config.url_prefix(), &config.render))
}

/// Execute render command
pub fn run_render(config: &LabConfig, slug: &str, args: &OutputArgs) -> Result<()> {
    let view = render_lab(config, slug)?;
    write_output(&view, args, "render")
}
