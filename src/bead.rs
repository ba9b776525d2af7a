use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ImportError, Result};

/// One record of a beads JSONL export. Only `id` is required; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BeadRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    /// Kept loose so a non-integer value degrades to the default priority.
    #[serde(default)]
    pub priority: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<BeadDependency>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BeadDependency {
    #[serde(default, rename = "type")]
    pub dep_type: Option<String>,
    #[serde(default)]
    pub depends_on_id: Option<String>,
}

impl BeadDependency {
    pub const BLOCKS: &'static str = "blocks";

    pub fn is_blocker(&self) -> bool {
        self.dep_type.as_deref() == Some(Self::BLOCKS)
    }
}

impl BeadRecord {
    /// Integer priority; a whole-number float such as `1.0` counts too.
    pub fn priority_level(&self) -> Option<i64> {
        let value = self.priority.as_ref()?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|level| level.fract() == 0.0)
                .map(|level| level as i64)
        })
    }

    pub fn dependencies(&self) -> &[BeadDependency] {
        self.dependencies.as_deref().unwrap_or_default()
    }
}

/// Read every record from a JSONL file.
pub fn load(path: &Path) -> Result<Vec<BeadRecord>> {
    let raw = fs::read_to_string(path).map_err(|source| ImportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_lines(&raw)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parse one record per non-blank line, failing on the first malformed one.
pub fn parse_lines(raw: &str) -> Result<Vec<BeadRecord>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ImportError::InvalidRecord {
                line: index + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_lines_skips_blank_lines_and_keeps_order() {
        let raw = "{\"id\":\"a\"}\n\n   \n{\"id\":\"b\"}\n";
        let records = parse_lines(raw).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn parse_lines_reads_full_record() {
        let raw = r#"{"id":"bd-1","title":"Fix bug","description":"d","design":"x","notes":"n","issue_type":"bug","priority":1,"status":"closed","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-02T00:00:00.5Z","dependencies":[{"issue_id":"bd-1","type":"blocks","depends_on_id":"bd-2"}],"assignee":"someone"}"#;
        let records = parse_lines(raw).unwrap();
        let record = &records[0];
        assert_eq!(record.title.as_deref(), Some("Fix bug"));
        assert_eq!(record.issue_type.as_deref(), Some("bug"));
        assert_eq!(record.priority_level(), Some(1));
        assert_eq!(record.status.as_deref(), Some("closed"));
        assert_eq!(record.dependencies().len(), 1);
        assert!(record.dependencies()[0].is_blocker());
        assert_eq!(
            record.dependencies()[0].depends_on_id.as_deref(),
            Some("bd-2")
        );
    }

    #[test]
    fn parse_lines_tolerates_nulls_and_missing_fields() {
        let raw = r#"{"id":"x","title":null,"priority":"high","dependencies":null}"#;
        let records = parse_lines(raw).unwrap();
        assert_eq!(records[0].title, None);
        assert_eq!(records[0].priority_level(), None);
        assert!(records[0].dependencies().is_empty());
    }

    #[test]
    fn priority_level_accepts_whole_number_floats() {
        let records = parse_lines(
            "{\"id\":\"a\",\"priority\":1.0}\n{\"id\":\"b\",\"priority\":1.5}\n{\"id\":\"c\",\"priority\":true}",
        )
        .unwrap();
        assert_eq!(records[0].priority_level(), Some(1));
        assert_eq!(records[1].priority_level(), None);
        assert_eq!(records[2].priority_level(), None);
    }

    #[test]
    fn parse_lines_reports_line_number_of_malformed_record() {
        let raw = "{\"id\":\"a\"}\n\nnot json\n";
        let err = parse_lines(raw).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord { line: 3, .. }));
        assert_eq!(err.code(), "invalid_record");
    }

    #[test]
    fn parse_lines_requires_an_id() {
        let err = parse_lines(r#"{"title":"orphan"}"#).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.jsonl");
        let err = load(&missing).unwrap_err();
        assert!(matches!(err, ImportError::ReadInput { .. }));
        assert!(err.to_string().contains("nope.jsonl"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.jsonl");
        fs::write(&path, "{\"id\":\"a\"}\n{\"id\":\"b\"}").unwrap();
        assert_eq!(load(&path).unwrap().len(), 2);
    }
}
