//! Integration tests for input file collection.

use std::fs;
use std::path::{Path, PathBuf};

use batchx::{CollectError, collect_files};
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path
}

fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn walks_directories_files_first_sorted() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "b.ts");
    touch(dir.path(), "a.ts");
    touch(dir.path(), "sub/c.ts");
    touch(dir.path(), "sub/deeper/d.ts");
    touch(dir.path(), "z.ts");

    let files = collect_files(&[dir.path()], &[]).unwrap();
    assert_eq!(
        names(dir.path(), &files),
        vec!["a.ts", "b.ts", "z.ts", "sub/c.ts", "sub/deeper/d.ts"]
    );
}

#[test]
fn filters_by_extension_ignoring_case() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.TS");
    touch(dir.path(), "b.mkv");
    touch(dir.path(), "c.mp4");
    touch(dir.path(), "noext");

    let files = collect_files(&[dir.path()], &exts(&["ts", "mkv"])).unwrap();
    assert_eq!(names(dir.path(), &files), vec!["a.TS", "b.mkv"]);
}

#[test]
fn explicit_files_keep_argument_order() {
    let dir = TempDir::new().unwrap();
    let second = touch(dir.path(), "b.ts");
    let first = touch(dir.path(), "a.ts");
    let skipped = touch(dir.path(), "c.txt");

    let files = collect_files(&[&second, &first, &skipped], &exts(&["ts"])).unwrap();
    assert_eq!(files, vec![second, first]);
}

#[test]
fn missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let err = collect_files(&[&missing], &[]).unwrap_err();
    let CollectError::Walk { path, .. } = err;
    assert_eq!(path, missing);
}
