use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::id_map::IdMap;
use crate::markdown::{self, TaskDocument};
use crate::model::{Status, Task};
use crate::store::paths;
use crate::task_id::TaskId;

/// Output directory holding the `.tasks/` tree and the id mapping.
pub struct TaskTree {
    root: PathBuf,
}

impl TaskTree {
    /// Create every status directory. Existing directories are left alone.
    pub fn init(output_root: &Path) -> Result<Self> {
        for status in Status::ALL {
            fs::create_dir_all(paths::status_dir(output_root, status))?;
        }
        Ok(Self {
            root: output_root.to_path_buf(),
        })
    }

    /// Render and write one task, replacing any file already at its path.
    pub fn write_task(&self, task: &Task) -> Result<PathBuf> {
        let path = paths::task_path(&self.root, task.status, &task.id);
        fs::write(&path, markdown::render(task))?;
        tracing::debug!(id = %task.id, status = %task.status, "wrote task");
        Ok(path)
    }

    pub fn write_mapping(&self, ids: &IdMap) -> Result<PathBuf> {
        let path = paths::mapping_path(&self.root);
        let json = serde_json::to_string_pretty(ids)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Parse a written task back; used to check the tree after an import.
    pub fn read_task(&self, status: Status, id: &TaskId) -> Result<TaskDocument> {
        let content = fs::read_to_string(paths::task_path(&self.root, status, id))?;
        markdown::parse(&content)
    }

    /// Ids of the task files under one status directory, sorted.
    pub fn list_ids(&self, status: Status) -> Result<Vec<TaskId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(paths::status_dir(&self.root, status))? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".md")
                && let Ok(id) = stem.parse::<TaskId>()
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
