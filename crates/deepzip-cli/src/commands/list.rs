//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use deepzip_core::Extractor;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Expands the archive into a temporary directory and lists its files.
///
/// The temporary tree belongs to the extractor and is removed when it goes
/// out of scope at the end of this function.
pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut extractor = Extractor::new();

    let root = if args.no_recursive {
        add_archive_context(extractor.extract_one(&args.archive, None), &args.archive)?
    } else {
        add_archive_context(extractor.extract_recursive(&args.archive, None), &args.archive)?
    };

    let files = collect_files(&root)?;
    formatter.format_listing(&args.archive, &files)?;

    Ok(())
}

/// Regular files below `root`, relative to it, in file name order.
fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("b/empty")).unwrap();
        std::fs::write(temp.path().join("b/two.txt"), "2").unwrap();
        std::fs::write(temp.path().join("a.txt"), "1").unwrap();

        let files = collect_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b").join("two.txt")]
        );
    }
}
