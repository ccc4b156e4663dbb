//! Integration tests for deepzip-core.
//!
//! These tests verify end-to-end workflows with real filesystem operations.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use deepzip_core::ExtractionError;
use deepzip_core::Extractor;
use deepzip_core::ExtractorConfig;
use deepzip_core::ProgressCallback;
use deepzip_core::is_archive;
use deepzip_core::test_utils::ZipTestBuilder;
use deepzip_core::test_utils::create_test_zip;
use deepzip_core::test_utils::write_archive;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Relative paths of every regular file below `root`, sorted.
fn files_under(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// Builds `level0.zip` containing `level1.zip` containing ... `level{depth}`
/// and a `leaf.txt` at the bottom.
fn nested_chain(depth: usize) -> Vec<u8> {
    let mut data = create_test_zip(&[("leaf.txt", "bottom")]);
    for level in (1..=depth).rev() {
        let name = format!("level{level}.zip");
        data = ZipTestBuilder::new()
            .add_file(&format!("marker{level}.txt"), b"m")
            .add_file(&name, &data)
            .build();
    }
    data
}

#[test]
fn test_extract_one_scenario() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(
        work.path(),
        "a.zip",
        &create_test_zip(&[("root.txt", "root body"), ("sub/nested.txt", "nested body")]),
    );
    let target = work.path().join("T");

    let mut extractor = Extractor::new();
    let returned = extractor.extract_one(&archive, Some(&target)).unwrap();

    assert_eq!(returned, target);
    assert_eq!(fs::read_to_string(target.join("root.txt")).unwrap(), "root body");
    assert_eq!(
        fs::read_to_string(target.join("sub/nested.txt")).unwrap(),
        "nested body"
    );
    assert_eq!(files_under(&target), vec!["root.txt", "sub/nested.txt"]);
}

#[test]
fn test_extract_recursive_scenario() {
    let work = TempDir::new().unwrap();
    let inner = create_test_zip(&[("inner.txt", "inner body")]);
    let outer = ZipTestBuilder::new()
        .add_file("outer.txt", b"outer body")
        .add_file("nested/inner.zip", &inner)
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("T");

    let mut extractor = Extractor::new();
    let returned = extractor.extract_recursive(&archive, Some(&target)).unwrap();

    assert_eq!(returned, target);
    assert!(target.join("outer.txt").is_file());
    assert_eq!(
        fs::read_to_string(target.join("nested/inner/inner.txt")).unwrap(),
        "inner body"
    );
    assert!(!target.join("nested/inner.zip").exists());
    assert!(archive.exists(), "the top-level archive is never deleted");
}

#[test]
fn test_recursive_unpacks_every_level() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "level0.zip", &nested_chain(5));
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    let report = extractor
        .extract_recursive_with_progress(&archive, Some(&target), &mut deepzip_core::NoopProgress)
        .unwrap();

    assert_eq!(report.nested_archives, 5);
    let files = files_under(&target);
    assert!(files.iter().all(|f| !is_archive(&target.join(f))));
    assert!(files.iter().all(|f| !f.to_ascii_lowercase().ends_with(".zip")));
    assert!(files.contains(&"level1/level2/level3/level4/level5/leaf.txt".to_string()));
}

#[test]
fn test_recursive_siblings_in_order() {
    let work = TempDir::new().unwrap();
    let a = create_test_zip(&[("a.txt", "a")]);
    let b = create_test_zip(&[("b.txt", "b")]);
    let outer = ZipTestBuilder::new()
        .add_file("two/b.zip", &b)
        .add_file("one/A.ZIP", &a)
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    extractor.extract_recursive(&archive, Some(&target)).unwrap();

    assert_eq!(files_under(&target), vec!["one/A/a.txt", "two/b/b.txt"]);
}

#[test]
fn test_fake_zip_is_kept() {
    let work = TempDir::new().unwrap();
    let outer = ZipTestBuilder::new()
        .add_file("notes.zip", b"just text, not an archive")
        .add_file("real.txt", b"ok")
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    let report = extractor
        .extract_recursive_with_progress(&archive, Some(&target), &mut deepzip_core::NoopProgress)
        .unwrap();

    assert_eq!(
        fs::read_to_string(target.join("notes.zip")).unwrap(),
        "just text, not an archive"
    );
    assert_eq!(report.nested_archives, 0);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("notes.zip"));
}

#[test]
fn test_fake_zip_warned_once_after_merge() {
    let work = TempDir::new().unwrap();
    let docs = create_test_zip(&[("a.txt", "a")]);
    let outer = ZipTestBuilder::new()
        .add_file("docs/fake.zip", b"not a zip")
        .add_file("docs.zip", &docs)
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    let report = extractor
        .extract_recursive_with_progress(&archive, Some(&target), &mut deepzip_core::NoopProgress)
        .unwrap();

    assert_eq!(files_under(&target), vec!["docs/a.txt", "docs/fake.zip"]);
    assert_eq!(report.nested_archives, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("fake.zip"));
}

#[test]
fn test_nested_archive_with_dot_stem() {
    let work = TempDir::new().unwrap();
    let inner = create_test_zip(&[("inner.txt", "in")]);
    let outer = ZipTestBuilder::new()
        .add_file("..zip", &inner)
        .add_file("keep.txt", b"keep")
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    let report = extractor
        .extract_recursive_with_progress(&archive, Some(&target), &mut deepzip_core::NoopProgress)
        .expect("a `..zip` entry should expand beside its siblings");

    assert_eq!(files_under(&target), vec!["._zip/inner.txt", "keep.txt"]);
    assert!(!target.join("..zip").exists());
    assert_eq!(report.nested_archives, 1);
}

#[test]
fn test_nesting_depth_at_limit_succeeds() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "level0.zip", &nested_chain(3));

    let mut extractor = Extractor::with_config(ExtractorConfig::default().with_max_nesting_depth(3));
    let root = extractor.extract_recursive(&archive, None).unwrap();

    assert!(root.join("level1/level2/level3/leaf.txt").is_file());
}

#[test]
fn test_nesting_depth_over_limit_fails() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "level0.zip", &nested_chain(3));

    let mut extractor = Extractor::with_config(ExtractorConfig::default().with_max_nesting_depth(2));
    let result = extractor.extract_recursive(&archive, None);

    match result {
        Err(ExtractionError::NestingTooDeep { path, depth, max }) => {
            assert_eq!(depth, 3);
            assert_eq!(max, 2);
            assert!(path.ends_with("level3.zip"));
        }
        other => panic!("expected NestingTooDeep, got {other:?}"),
    }
}

#[test]
fn test_zero_depth_limit_rejects_any_nesting() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "level0.zip", &nested_chain(1));

    let mut extractor = Extractor::with_config(ExtractorConfig::default().with_max_nesting_depth(0));
    assert!(matches!(
        extractor.extract_recursive(&archive, None),
        Err(ExtractionError::NestingTooDeep { depth: 1, .. })
    ));
    // extract_one never looks at nested archives
    assert!(extractor.extract_one(&archive, None).is_ok());
}

#[test]
fn test_corrupt_entry_data() {
    let work = TempDir::new().unwrap();
    let data = ZipTestBuilder::new()
        .add_file("payload.bin", b"0123456789abcdef")
        .build_corrupted();
    let archive = write_archive(work.path(), "corrupt.zip", &data);

    // The central directory is intact, so it still looks like an archive.
    assert!(is_archive(&archive));

    let mut extractor = Extractor::new();
    let result = extractor.extract_one(&archive, Some(&work.path().join("out")));
    assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
}

#[test]
fn test_truncated_archive() {
    let work = TempDir::new().unwrap();
    let mut data = create_test_zip(&[("a.txt", "some content here")]);
    data.truncate(data.len() / 2);
    let archive = write_archive(work.path(), "truncated.zip", &data);

    assert!(!is_archive(&archive));
    let mut extractor = Extractor::new();
    assert!(matches!(
        extractor.extract_one(&archive, None),
        Err(ExtractionError::InvalidArchive(_))
    ));
    assert_eq!(extractor.temp_dirs().count(), 0);
}

#[test]
fn test_missing_archive_is_io_error() {
    let work = TempDir::new().unwrap();
    let mut extractor = Extractor::new();
    assert!(matches!(
        extractor.extract_one(&work.path().join("missing.zip"), None),
        Err(ExtractionError::Io(_))
    ));
}

#[test]
fn test_legacy_names_end_to_end() {
    let work = TempDir::new().unwrap();
    let data = ZipTestBuilder::new()
        .add_legacy_name("测试文件.docx", b"docx bytes")
        .add_legacy_name("资料/你好.txt", b"hello")
        .add_file("plain.txt", b"plain")
        .build();
    let archive = write_archive(work.path(), "legacy.zip", &data);
    let target = work.path().join("out");

    let mut extractor = Extractor::new();
    let report = extractor
        .extract_one_with_progress(&archive, Some(&target), &mut deepzip_core::NoopProgress)
        .unwrap();

    assert_eq!(
        fs::read(target.join("测试文件.docx")).unwrap(),
        b"docx bytes"
    );
    assert_eq!(fs::read(target.join("资料/你好.txt")).unwrap(), b"hello");
    assert!(target.join("plain.txt").is_file());
    assert_eq!(report.recovered_names.len(), 2);
}

#[test]
fn test_is_archive_extension_case() {
    let work = TempDir::new().unwrap();
    let data = create_test_zip(&[("f.txt", "x")]);
    for name in ["lower.zip", "UPPER.ZIP", "Mixed.ZiP"] {
        let path = write_archive(work.path(), name, &data);
        assert!(is_archive(&path), "{name} should be an archive");
    }

    let fake = write_archive(work.path(), "fake.zip", b"PK\x03\x04 but nothing else");
    assert!(!is_archive(&fake));
}

#[test]
fn test_cleanup_removes_only_pooled_dirs() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "a.zip", &create_test_zip(&[("f.txt", "x")]));
    let explicit = work.path().join("keep");

    let mut extractor = Extractor::new();
    let pooled_one = extractor.extract_recursive(&archive, None).unwrap();
    let pooled_two = extractor.extract_one(&archive, None).unwrap();
    extractor.extract_one(&archive, Some(&explicit)).unwrap();

    let listed: Vec<PathBuf> = extractor.temp_dirs().map(Path::to_path_buf).collect();
    assert_eq!(listed, vec![pooled_one.clone(), pooled_two.clone()]);

    extractor.cleanup();
    assert!(!pooled_one.exists());
    assert!(!pooled_two.exists());
    assert!(explicit.join("f.txt").is_file());

    extractor.cleanup();
    assert!(explicit.join("f.txt").is_file());
}

#[test]
fn test_drop_removes_temp_dirs() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "a.zip", &create_test_zip(&[("f.txt", "x")]));
    let explicit = work.path().join("keep");

    let pooled = {
        let mut extractor = Extractor::new();
        extractor.extract_one(&archive, Some(&explicit)).unwrap();
        extractor.extract_one(&archive, None).unwrap()
    };

    assert!(!pooled.exists());
    assert!(explicit.join("f.txt").is_file());
}

#[test]
fn test_drop_after_error_removes_temp_dirs() {
    let work = TempDir::new().unwrap();
    let data = ZipTestBuilder::new()
        .add_file("payload.bin", b"0123456789abcdef")
        .build_corrupted();
    let archive = write_archive(work.path(), "corrupt.zip", &data);

    let pooled: Vec<PathBuf> = {
        let mut extractor = Extractor::new();
        assert!(extractor.extract_one(&archive, None).is_err());
        extractor.temp_dirs().map(Path::to_path_buf).collect()
    };

    assert_eq!(pooled.len(), 1);
    assert!(!pooled[0].exists());
}

#[test]
fn test_nested_output_lives_in_pooled_dir() {
    let work = TempDir::new().unwrap();
    let archive = write_archive(work.path(), "level0.zip", &nested_chain(2));

    let mut extractor = Extractor::new();
    let root = extractor.extract_recursive(&archive, None).unwrap();

    // Nested archives use explicit targets inside the root, so only the
    // root itself is pooled.
    assert_eq!(extractor.temp_dirs().count(), 1);
    extractor.cleanup();
    assert!(!root.exists());
}

#[derive(Default)]
struct Recorder {
    archives: Vec<(PathBuf, usize)>,
    entries: Vec<(PathBuf, usize, usize)>,
    completed_entries: usize,
    bytes: u64,
    completed: usize,
}

impl ProgressCallback for Recorder {
    fn on_archive_start(&mut self, archive: &Path, depth: usize) {
        self.archives.push((archive.to_path_buf(), depth));
    }

    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
        self.entries.push((path.to_path_buf(), total, current));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.completed_entries += 1;
    }

    fn on_complete(&mut self) {
        self.completed += 1;
    }
}

#[test]
fn test_progress_events() {
    let work = TempDir::new().unwrap();
    let inner = create_test_zip(&[("deep.txt", "deep")]);
    let outer = ZipTestBuilder::new()
        .add_directory("dir/")
        .add_file("dir/inner.zip", &inner)
        .build();
    let archive = write_archive(work.path(), "outer.zip", &outer);
    let target = work.path().join("out");

    let mut recorder = Recorder::default();
    let mut extractor = Extractor::new();
    let report = extractor
        .extract_recursive_with_progress(&archive, Some(&target), &mut recorder)
        .unwrap();

    assert_eq!(recorder.archives.len(), 2);
    assert_eq!(recorder.archives[0], (archive.clone(), 0));
    assert_eq!(recorder.archives[1].1, 1);
    assert!(recorder.archives[1].0.ends_with("dir/inner.zip"));

    assert_eq!(
        recorder.entries[0],
        (PathBuf::from("dir/"), 2, 1),
        "entry names are reported as stored"
    );
    assert_eq!(recorder.entries.len(), 3);
    assert_eq!(recorder.completed_entries, 3);
    assert_eq!(recorder.completed, 1);
    assert_eq!(recorder.bytes, report.bytes_written);
}
