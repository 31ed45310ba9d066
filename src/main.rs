mod cli;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use treesync::sync::{SyncEngine, SyncOptions, SyncReporter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let start = Instant::now();

    let result = match cli.command {
        Commands::Sync {
            src,
            dst,
            threads,
            disable_file_deletion,
            src_ignore,
            dst_ignore,
        } => {
            let options = SyncOptions {
                threads,
                delete_extraneous: !disable_file_deletion,
                src_ignores: src_ignore,
                dst_ignores: dst_ignore,
            };
            SyncEngine::new(options)
                .sync(&src, &dst)
                .context("Failed to synchronize directories")?
        }
        Commands::Copy {
            src,
            dst,
            threads,
            src_ignore,
        } => {
            let options = SyncOptions {
                threads,
                delete_extraneous: false,
                src_ignores: src_ignore,
                dst_ignores: Vec::new(),
            };
            SyncEngine::new(options)
                .copy_path(&src, &dst)
                .context("Failed to copy")?
        }
    };

    debug!(
        "run time: {:.3}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    print!("{}", SyncReporter::generate_summary(&result));

    Ok(())
}

/// Map the numeric log level (spdlog-style, default warn) onto tracing
fn init_logging(level: u8) {
    let filter = match level {
        0 => LevelFilter::TRACE,
        1 => LevelFilter::DEBUG,
        2 => LevelFilter::INFO,
        3 => LevelFilter::WARN,
        4 | 5 => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    };

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .init();
}
