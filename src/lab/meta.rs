//! Lab metadata from front-matter.

use serde::Serialize;
use serde_json::Map as JsonMap;
use serde_yaml::{Mapping, Value};

/// Lab metadata parsed from the front-matter header.
///
/// # Standard Fields
///
/// | Field         | Type          | Description                                 |
/// |---------------|---------------|---------------------------------------------|
/// | `title`       | `String`      | Lab title                                   |
/// | `date`        | `String`      | Date as written (ISO-ish)                   |
/// | `difficulty`  | `String`      | Difficulty label                            |
/// | `os`          | `String`      | Target operating system                     |
/// | `summary`     | `String`      | One-line summary                            |
/// | `tags`        | `Vec<String>` | List, or comma-separated string             |
/// | `slug`        | `String`      | Explicit slug (overrides the title)         |
/// | `screenshots` | `Vec<String>` | Images in the lab folder; first is a poster |
/// | `logo`        | `String`      | Logo path                                   |
/// | `normalized`  | `String`      | Marker written by `labkit build`            |
///
/// Every other key is kept in `extra`.
///
/// Scalars are accepted loosely: a number or boolean where a string is
/// expected is converted with its YAML spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip)]
    pub normalized: Option<String>,
    /// Keys with no named field.
    #[serde(flatten)]
    pub extra: JsonMap<String, serde_json::Value>,
}

impl LabMeta {
    /// Build from a parsed header mapping. Never fails; keys that cannot be
    /// read into their field are dropped.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let mut meta = Self::default();

        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                continue;
            };

            match key {
                "title" => meta.title = scalar_string(value),
                "date" => meta.date = scalar_string(value),
                "difficulty" => meta.difficulty = scalar_string(value),
                "os" => meta.os = scalar_string(value),
                "summary" => meta.summary = scalar_string(value),
                "tags" => meta.tags = string_list(value),
                "slug" => meta.slug = scalar_string(value),
                "screenshots" => meta.screenshots = string_list(value),
                "logo" => meta.logo = scalar_string(value),
                "normalized" => meta.normalized = scalar_string(value),
                _ => {
                    if let Ok(json) = serde_json::to_value(value) {
                        meta.extra.insert(key.to_string(), json);
                    }
                }
            }
        }

        meta
    }

    /// Non-empty title, if any.
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Non-empty explicit slug, if any.
    pub fn slug(&self) -> Option<&str> {
        non_empty(self.slug.as_deref())
    }
}

/// Treat blank strings as missing.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Read a scalar as a string (`null` and collections yield `None`).
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Read a list of strings from a sequence or a comma-separated string.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(scalar_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_named_fields() {
        let meta = LabMeta::from_mapping(&mapping(
            "title: Lame\ndate: 2024-05-01\ndifficulty: Easy\nos: Linux\nsummary: SMB\ntags: [smb, samba]\nlogo: logo.png",
        ));
        assert_eq!(meta.title.as_deref(), Some("Lame"));
        assert_eq!(meta.date.as_deref(), Some("2024-05-01"));
        assert_eq!(meta.difficulty.as_deref(), Some("Easy"));
        assert_eq!(meta.os.as_deref(), Some("Linux"));
        assert_eq!(meta.summary.as_deref(), Some("SMB"));
        assert_eq!(meta.tags, vec!["smb", "samba"]);
        assert_eq!(meta.logo.as_deref(), Some("logo.png"));
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_tags_comma_string() {
        let meta = LabMeta::from_mapping(&mapping("tags: web, sqli , ,rce"));
        assert_eq!(meta.tags, vec!["web", "sqli", "rce"]);
    }

    #[test]
    fn test_screenshots_single_string() {
        let meta = LabMeta::from_mapping(&mapping("screenshots: poster.png"));
        assert_eq!(meta.screenshots, vec!["poster.png"]);
    }

    #[test]
    fn test_loose_scalars() {
        let meta = LabMeta::from_mapping(&mapping("title: 1337\nslug: true\nos: ~"));
        assert_eq!(meta.title.as_deref(), Some("1337"));
        assert_eq!(meta.slug.as_deref(), Some("true"));
        assert_eq!(meta.os, None);
    }

    #[test]
    fn test_extra_fields() {
        let meta = LabMeta::from_mapping(&mapping("title: x\nplatform: HTB\npoints: 20"));
        assert_eq!(meta.extra.get("platform"), Some(&serde_json::json!("HTB")));
        assert_eq!(meta.extra.get("points"), Some(&serde_json::json!(20)));
    }

    #[test]
    fn test_blank_title_is_missing() {
        let meta = LabMeta::from_mapping(&mapping("title: '  '"));
        assert_eq!(meta.title(), None);
    }

    #[test]
    fn test_serialize_flattens_extra() {
        let meta = LabMeta::from_mapping(&mapping("title: x\nplatform: HTB\nnormalized: abc"));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["title"], "x");
        assert_eq!(json["platform"], "HTB");
        assert_eq!(json["tags"], serde_json::json!([]));
        assert!(json.get("normalized").is_none());
    }
}
