//! Per-lab records of the aggregate `labs.json` index.

use serde::Serialize;

use super::LabMeta;
use super::embed::asset_url;

/// One entry of the aggregate index.
///
/// Missing optional fields are omitted from the JSON; `poster` is always
/// present and `null` when the lab has no screenshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub poster: Option<String>,
    pub md_path: String,
}

impl LabSummary {
    /// Summarize the lab at `/<url_prefix>/<folder>/<file_name>`.
    pub fn new(meta: &LabMeta, slug: String, url_prefix: &str, folder: &str, file_name: &str) -> Self {
        let poster = meta
            .screenshots
            .iter()
            .map(|shot| shot.trim())
            .find(|shot| !shot.is_empty())
            .map(|shot| asset_url(url_prefix, folder, shot));

        Self {
            title: meta.title.clone(),
            slug,
            date: meta.date.clone(),
            difficulty: meta.difficulty.clone(),
            os: meta.os.clone(),
            summary: meta.summary.clone(),
            tags: meta.tags.clone(),
            poster,
            md_path: asset_url(url_prefix, folder, file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_summary() {
        let meta = LabMeta {
            title: Some("Lame".into()),
            date: Some("2024-05-01".into()),
            difficulty: Some("Easy".into()),
            os: Some("Linux".into()),
            summary: Some("SMB usermap".into()),
            tags: vec!["smb".into(), "cve".into()],
            screenshots: vec!["poster.png".into(), "two.png".into()],
            ..Default::default()
        };
        let summary = LabSummary::new(&meta, "lame".into(), "labs", "lame", "lame.md");

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "title": "Lame",
                "slug": "lame",
                "date": "2024-05-01",
                "difficulty": "Easy",
                "os": "Linux",
                "summary": "SMB usermap",
                "tags": ["smb", "cve"],
                "poster": "/labs/lame/poster.png",
                "mdPath": "/labs/lame/lame.md"
            })
        );
    }

    #[test]
    fn test_missing_fields_omitted_poster_null() {
        let summary = LabSummary::new(&LabMeta::default(), "box".into(), "labs", "box", "box.md");
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "slug": "box",
                "tags": [],
                "poster": null,
                "mdPath": "/labs/box/box.md"
            })
        );
    }

    #[test]
    fn test_paths_use_folder_and_encode() {
        let meta = LabMeta {
            screenshots: vec!["shots/first one.png".into()],
            ..Default::default()
        };
        let summary = LabSummary::new(&meta, "derived".into(), "content/labs", "My Box", "notes.md");
        assert_eq!(summary.poster.as_deref(), Some("/content/labs/My%20Box/shots/first%20one.png"));
        assert_eq!(summary.md_path, "/content/labs/My%20Box/notes.md");
        assert_eq!(summary.slug, "derived");
    }
}
