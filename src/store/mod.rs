pub mod files;
pub mod paths;
