//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use deepzip_core::ExtractorConfig;
use deepzip_core::config::DEFAULT_MAX_NESTING_DEPTH;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deepzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract archives, unpacking nested archives in place
    Extract(ExtractArgs),
    /// List the files an archive expands to
    List(ListArgs),
    /// Report whether paths are ZIP archives
    Probe(ProbeArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Archives to extract
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<PathBuf>,

    /// Directory receiving one subdirectory per archive (default: current
    /// directory)
    #[arg(short, long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Leave nested archives packed
    #[arg(long)]
    pub no_recursive: bool,

    /// Maximum nesting depth for nested archives
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_depth: usize,

    /// Keep entry names exactly as stored, without legacy encoding recovery
    #[arg(long)]
    pub raw_names: bool,
}

impl ExtractArgs {
    pub fn config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_max_nesting_depth(self.max_depth)
            .with_legacy_name_recovery(!self.raw_names)
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// List nested archives as files instead of their contents
    #[arg(long)]
    pub no_recursive: bool,
}

#[derive(clap::Args)]
pub struct ProbeArgs {
    /// Paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
