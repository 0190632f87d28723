//! Input file collection.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::batch::error::CollectError;

/// Collect the input files named by `paths`.
///
/// Files are kept when their extension matches; directories are walked
/// recursively, files before subdirectories, each sorted by name. Matching
/// ignores ASCII case and an empty `extensions` list accepts every file.
/// Results keep the order of `paths`.
pub fn collect_files<P: AsRef<Path>>(
    paths: &[P],
    extensions: &[String],
) -> Result<Vec<PathBuf>, CollectError> {
    let mut files = Vec::new();
    for root in paths {
        let root = root.as_ref();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by(|a, b| {
                b.file_type()
                    .is_file()
                    .cmp(&a.file_type().is_file())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            });
        for entry in walker {
            let entry = entry.map_err(|source| CollectError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if matches_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "skipping file with unlisted extension");
            }
        }
    }
    Ok(files)
}

/// Whether `path` has one of `extensions` (without the dot, ASCII case-insensitive).
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use batchx::matches_extension;
///
/// let extensions = vec!["ts".to_string(), "mkv".to_string()];
/// assert!(matches_extension(Path::new("a/clip.TS"), &extensions));
/// assert!(!matches_extension(Path::new("a/clip.mp4"), &extensions));
/// assert!(matches_extension(Path::new("a/clip.mp4"), &[]));
/// ```
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Split an extension list such as `"ts mkv, .mp4"` into bare extensions.
pub fn parse_extensions(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .map(|ext| ext.trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extensions_strips_dots_and_separators() {
        assert_eq!(parse_extensions("ts mkv"), vec!["ts", "mkv"]);
        assert_eq!(parse_extensions(" .ts,.mkv; mp4 "), vec!["ts", "mkv", "mp4"]);
        assert!(parse_extensions("  ").is_empty());
    }
}
