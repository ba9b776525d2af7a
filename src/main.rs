use std::path::PathBuf;

use bt_import::config::{ImportConfig, log_filter};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bt-import",
    version,
    about = "Convert a beads JSONL export into a bt .tasks/ tree"
)]
struct Cli {
    /// Beads JSONL export to read
    input: PathBuf,
    /// Directory that receives .tasks/ and id-mapping.json
    #[arg(default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    bt_import::logging::init_logging(&log_filter());

    let config = ImportConfig::new(cli.input, cli.output_dir);
    if let Err(e) = bt_import::commands::import::run(&config) {
        tracing::debug!(code = e.code(), "import failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
