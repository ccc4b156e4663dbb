//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use deepzip_core::ExtractionReport;
use deepzip_core::Extractor;
use deepzip_core::ExtractorConfig;
use deepzip_core::NoopProgress;
use deepzip_core::ProgressCallback;
use log::debug;
use log::info;
use log::warn;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Extracts every archive into `<output>/<stem>`.
///
/// A failing archive is reported and the rest are still processed; the
/// command fails afterwards if any archive did.
pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_root = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };
    let config = args.config();

    let mut failed = 0_usize;
    for archive in &args.archives {
        let target = output_root.join(archive_stem(archive));
        info!("extracting {} into {}", archive.display(), target.display());

        match extract(archive, &target, &config, !args.no_recursive, show_progress) {
            Ok(report) => {
                for name in &report.recovered_names {
                    debug!("recovered name {:?} from {:?}", name.decoded, name.stored);
                }
                formatter.format_extraction_result(archive, &report)?;
            }
            Err(err) => {
                warn!("{} failed", archive.display());
                formatter.format_error("extract", archive, &err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} archives failed to extract", args.archives.len());
    }
    Ok(())
}

fn extract(
    archive: &Path,
    target: &Path,
    config: &ExtractorConfig,
    recursive: bool,
    show_progress: bool,
) -> Result<ExtractionReport> {
    let result = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        run(archive, target, config, recursive, &mut progress)
    } else {
        run(archive, target, config, recursive, &mut NoopProgress)
    };
    add_archive_context(result, archive)
}

fn run(
    archive: &Path,
    target: &Path,
    config: &ExtractorConfig,
    recursive: bool,
    progress: &mut dyn ProgressCallback,
) -> deepzip_core::Result<ExtractionReport> {
    let mut extractor = Extractor::with_config(config.clone());
    if recursive {
        extractor.extract_recursive_with_progress(archive, Some(target), progress)
    } else {
        extractor.extract_one_with_progress(archive, Some(target), progress)
    }
}

/// Directory name an archive is extracted under: its file stem, or
/// `archive` when the path has none.
fn archive_stem(archive: &Path) -> PathBuf {
    archive
        .file_stem()
        .map_or_else(|| PathBuf::from("archive"), PathBuf::from)
}
