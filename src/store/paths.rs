use std::path::{Path, PathBuf};

use crate::model::Status;
use crate::task_id::TaskId;

/// Task tree directory under the output root.
pub const TASKS_DIR: &str = ".tasks";
/// Source-to-output id mapping written next to the task tree.
pub const MAPPING_FILE: &str = "id-mapping.json";
pub const TASK_EXTENSION: &str = "md";

pub fn tasks_dir(output_root: &Path) -> PathBuf {
    under(output_root, TASKS_DIR)
}

pub fn status_dir(output_root: &Path, status: Status) -> PathBuf {
    tasks_dir(output_root).join(status.dir_name())
}

/// `<root>/.tasks/<status>/<id>.md`
pub fn task_path(output_root: &Path, status: Status, id: &TaskId) -> PathBuf {
    status_dir(output_root, status).join(format!("{id}.{TASK_EXTENSION}"))
}

pub fn mapping_path(output_root: &Path) -> PathBuf {
    under(output_root, MAPPING_FILE)
}

/// Join `name` onto the root, leaving out a bare `.` root.
fn under(output_root: &Path, name: &str) -> PathBuf {
    if output_root == Path::new(".") {
        PathBuf::from(name)
    } else {
        output_root.join(name)
    }
}
