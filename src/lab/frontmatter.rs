//! Front-matter extraction from YAML (`---`) or TOML (`+++`) headers.

use serde_yaml::{Mapping, Value};

use super::LabMeta;

/// State of the header region at the top of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Header {
    /// No delimited header.
    Absent,
    /// Header parsed into a mapping (key order preserved).
    Parsed(Mapping),
    /// Header present but unreadable; the reason is kept for diagnostics.
    Malformed(String),
}

impl Header {
    /// Parsed mapping, if any.
    pub fn mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Parsed(mapping) => Some(mapping),
            Self::Absent | Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// Result of splitting a document into metadata and body.
#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    pub header: Header,
    pub meta: LabMeta,
    pub body: &'a str,
}

/// Split `content` into metadata and body.
///
/// Without a header the whole text is the body. A malformed header degrades
/// to empty metadata; the body still starts after the header. A leading
/// byte-order mark is not part of either.
pub fn extract(content: &str) -> FrontMatter<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some((raw, body, format)) = detect(content) else {
        return FrontMatter {
            header: Header::Absent,
            meta: LabMeta::default(),
            body: content,
        };
    };

    let header = match format {
        Format::Yaml => parse_yaml(raw),
        Format::Toml => parse_toml(raw),
    };
    let meta = header.mapping().map(LabMeta::from_mapping).unwrap_or_default();

    FrontMatter { header, meta, body }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

/// Detect a delimited header. Returns `(header, body, format)`.
fn detect(content: &str) -> Option<(&str, &str, Format)> {
    let trimmed = content.trim_start();

    split_delimited(trimmed, "---")
        .map(|(fm, body)| (fm, body, Format::Yaml))
        .or_else(|| split_delimited(trimmed, "+++").map(|(fm, body)| (fm, body, Format::Toml)))
}

/// Split `text` opening with a `delim` line at the next line that is exactly
/// `delim`. Blank lines after the closing delimiter are not part of the body.
fn split_delimited<'a>(text: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let rest = text.strip_prefix(delim)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delim {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(raw: &str) -> Header {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Mapping(mapping)) => Header::Parsed(mapping),
        Ok(Value::Null) => Header::Parsed(Mapping::new()),
        Ok(_) => Header::Malformed("front-matter is not a key/value mapping".to_string()),
        Err(e) => Header::Malformed(format!("invalid YAML front-matter: {e}")),
    }
}

fn parse_toml(raw: &str) -> Header {
    match raw.parse::<toml::Table>() {
        Ok(table) => Header::Parsed(toml_table_to_mapping(table)),
        Err(e) => Header::Malformed(format!("invalid TOML front-matter: {}", e.message())),
    }
}

fn toml_table_to_mapping(table: toml::Table) -> Mapping {
    table
        .into_iter()
        .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
        .collect()
}

/// Convert a TOML value so both header formats share one representation.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(toml_table_to_mapping(table)),
    }
}
