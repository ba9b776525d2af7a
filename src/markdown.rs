//! bt task file format: a `---` delimited frontmatter block followed by the body.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::convert::format_timestamp;
use crate::error::{ImportError, Result};
use crate::model::{Priority, Task};
use crate::task_id::TaskId;

const DELIMITER: &str = "---";

/// Render a task file. Only double quotes in the title are escaped; tags and
/// ids are written raw.
pub fn render(task: &Task) -> String {
    let mut lines = vec![
        DELIMITER.to_string(),
        format!("title: \"{}\"", task.title.replace('"', "\\\"")),
        format!("id: {}", task.id),
        format!("created: {}", format_timestamp(task.created)),
        format!("updated: {}", format_timestamp(task.updated)),
        format!("priority: {}", task.priority),
    ];
    if !task.tags.is_empty() {
        lines.push(format!("tags: [{}]", task.tags.join(", ")));
    }
    if !task.blocked_by.is_empty() {
        let ids: Vec<&str> = task.blocked_by.iter().map(TaskId::as_str).collect();
        lines.push(format!("blocked_by: [{}]", ids.join(", ")));
    }
    lines.push(DELIMITER.to_string());
    if !task.body.is_empty() {
        lines.push(String::new());
        lines.push(task.body.clone());
    }
    lines.join("\n")
}

/// Frontmatter of a rendered task file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frontmatter {
    pub title: String,
    pub id: TaskId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub blocked_by: Vec<TaskId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Read a task file back into its frontmatter and body.
///
/// The importer never reads task files; this exists to verify what
/// [`render`] wrote.
pub fn parse(content: &str) -> Result<TaskDocument> {
    let rest = content
        .strip_prefix("---\n")
        .ok_or_else(|| invalid_document("missing opening frontmatter delimiter"))?;
    let (yaml, after) = rest
        .split_once("\n---")
        .ok_or_else(|| invalid_document("missing closing frontmatter delimiter"))?;

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml)
        .map_err(|e| invalid_document(format!("failed to parse frontmatter: {e}")))?;
    let body = after
        .strip_prefix("\n\n")
        .unwrap_or_else(|| after.trim_start_matches('\n'));

    Ok(TaskDocument {
        frontmatter,
        body: body.to_string(),
    })
}

fn invalid_document(message: impl Into<String>) -> ImportError {
    ImportError::InvalidDocument(message.into())
}
