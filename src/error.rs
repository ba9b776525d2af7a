use std::path::PathBuf;

use thiserror::Error;

use crate::task_id::TaskIdGenerationError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: not a valid record: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {id}: invalid {field} timestamp '{value}'")]
    InvalidTimestamp {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("record {0} has no assigned id")]
    Unmapped(String),

    #[error("invalid task document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    IdGeneration(#[from] TaskIdGenerationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadInput { .. } => "read_input",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::Unmapped(_) => "unmapped_record",
            Self::InvalidDocument(_) => "invalid_document",
            Self::IdGeneration(_) => "id_generation",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
