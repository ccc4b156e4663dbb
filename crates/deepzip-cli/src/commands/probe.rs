//! Probe command implementation

use crate::cli::ProbeArgs;
use crate::output::OutputFormatter;
use crate::output::ProbeResult;
use anyhow::Result;

/// Reports whether each path is a ZIP archive. Never fails on the paths
/// themselves: missing or unreadable files are simply not archives.
pub fn execute(args: &ProbeArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let results: Vec<ProbeResult> = args.paths.iter().map(|p| ProbeResult::probe(p)).collect();
    formatter.format_probe(&results)
}
