//! Convert a beads JSONL export into a bt `.tasks/` tree.
//!
//! The pipeline is [`bead::load`] → [`id_map::IdMap::assign`] →
//! [`convert::to_task`] → [`store::files::TaskTree`], driven by
//! [`commands::import::run`].

pub mod bead;
pub mod clock;
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod id_map;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod output;
pub mod store;
pub mod task_id;
