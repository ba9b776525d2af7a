use std::path::PathBuf;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "BT_IMPORT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where to read the export from and where to build the task tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl ImportConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Log filter from `BT_IMPORT_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> String {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
