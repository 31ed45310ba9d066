use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Directory tree synchronization tool
///
/// Makes a destination directory mirror a source directory, honoring
/// gitignore-style exclusion rules found in the trees or given on the
/// command line.
#[derive(Parser, Debug)]
#[command(name = "treesync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Log level: 0=trace, 1=debug, 2=info, 3=warn, 4=error, 6=off
    #[arg(long, global = true, value_name = "LEVEL", default_value_t = 3)]
    pub log_level: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize folder content from source to destination
    Sync {
        /// The source directory
        #[arg(short, long, value_name = "PATH")]
        src: PathBuf,

        /// The destination directory
        #[arg(short, long, value_name = "PATH")]
        dst: PathBuf,

        /// Worker pool size (default: host concurrency)
        #[arg(long, value_name = "N", default_value_t = 0)]
        threads: usize,

        /// Keep destination files that are absent from the source
        #[arg(long)]
        disable_file_deletion: bool,

        /// Ignore pattern applied to the source tree (repeatable)
        #[arg(long, value_name = "PATTERN")]
        src_ignore: Vec<String>,

        /// Ignore pattern applied to the destination tree (repeatable)
        #[arg(long, value_name = "PATTERN")]
        dst_ignore: Vec<String>,
    },

    /// Copy a file or directory tree; never deletes at the destination
    Copy {
        /// The source file or directory
        #[arg(short, long, value_name = "PATH")]
        src: PathBuf,

        /// The destination path
        #[arg(short, long, value_name = "PATH")]
        dst: PathBuf,

        /// Worker pool size (default: host concurrency)
        #[arg(long, value_name = "N", default_value_t = 0)]
        threads: usize,

        /// Ignore pattern applied to the source tree (repeatable)
        #[arg(long, value_name = "PATTERN")]
        src_ignore: Vec<String>,
    },
}
