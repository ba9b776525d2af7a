use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task_id::TaskId;

/// Task status. Derived from the directory a task file lives in, never stored in the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Blocked,
    Closed,
    Cancelled,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// A converted task, ready to be rendered to markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub blocked_by: Vec<TaskId>,
    pub status: Status,
    pub body: String,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Self::Open,
        Self::InProgress,
        Self::Blocked,
        Self::Closed,
        Self::Cancelled,
    ];

    /// Only `closed` is carried over; every other source status lands in `open`.
    pub fn from_source(status: Option<&str>) -> Self {
        match status {
            Some("closed") => Self::Closed,
            _ => Self::Open,
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Priority {
    pub fn from_source(level: Option<i64>) -> Self {
        match level {
            Some(0 | 1) => Self::Critical,
            Some(2) => Self::High,
            _ => Self::Medium,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
