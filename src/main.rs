mod clock;
mod config;
mod models;
mod numbering;
mod register;
mod report;
mod run;
mod stamp;
mod store;
mod thai;
mod ui;
mod years;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

const LOG_FILE_NAME: &str = "claimreg.log";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let data_dir = config.data_dir()?;
    let tui = args.len() == 1;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    init_logging(&config.logging.level, tui.then_some(data_dir.as_path()))?;

    let mut store = store::FlatFileStore::open(&data_dir, &config.store)?;

    match args.len() {
        1 => run::as_tui(&mut store, &config),
        2.. => run::as_cli(&args, &mut store, &config),
        _ => {
            eprintln!("Usage: claimreg [command]");
            Ok(())
        }
    }
}

/// `RUST_LOG` overrides the configured level. With a log dir, output goes to
/// a file there instead of stderr so it can't tear the TUI.
fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(level);
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(dir) = log_dir {
        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
