use std::path::PathBuf;

use crate::bead;
use crate::clock::{Clock, SystemClock};
use crate::config::ImportConfig;
use crate::convert;
use crate::error::Result;
use crate::id_map::IdMap;
use crate::model::Task;
use crate::output;
use crate::store::files::TaskTree;
use crate::task_id::{TaskIdGenerationError, os_random};

#[derive(Debug)]
pub struct ImportSummary {
    pub imported: usize,
    pub ids: IdMap,
    pub tasks: Vec<Task>,
    pub written: Vec<PathBuf>,
    pub mapping_path: PathBuf,
}

pub fn run(config: &ImportConfig) -> Result<ImportSummary> {
    run_with(config, &SystemClock, os_random)
}

/// Run the import with an explicit clock and random source.
///
/// Every record gets an id before any record is converted, so blockers that
/// point forward in the file resolve the same as those pointing back.
pub fn run_with<F>(config: &ImportConfig, clock: &dyn Clock, fill_random: F) -> Result<ImportSummary>
where
    F: FnMut(&mut [u8]) -> std::result::Result<(), TaskIdGenerationError>,
{
    let tree = TaskTree::init(&config.output_dir)?;
    let records = bead::load(&config.input)?;

    let ids = IdMap::assign_with(&records, fill_random)?;
    tracing::info!(records = records.len(), mapped = ids.len(), "assigned ids");

    let tasks = records
        .iter()
        .map(|record| convert::to_task(record, &ids, clock))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(tasks.len());
    for task in &tasks {
        let path = tree.write_task(task)?;
        output::print_created(&path);
        written.push(path);
    }

    let mapping_path = tree.write_mapping(&ids)?;
    output::print_summary(&mapping_path, records.len());
    tracing::info!(written = written.len(), "import complete");

    Ok(ImportSummary {
        imported: records.len(),
        ids,
        tasks,
        written,
        mapping_path,
    })
}
