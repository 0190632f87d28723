use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::path::{self, Path};

use bon::Builder;
use serde::Serialize;

/// Names of the properties exposed by [`FileProperties`].
pub const FILE_PROPERTY_NAMES: [&str; 5] = ["Name", "Extension", "DirectoryName", "FullName", "Path"];

/// A read-only lookup of named string attributes used by placeholders.
///
/// Names are matched case-sensitively. Returning `None` means the property is
/// unknown or has no value; both render as the empty string.
pub trait PropertySource {
    fn property(&self, name: &str) -> Option<&str>;
}

impl PropertySource for HashMap<String, String> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<P: PropertySource + ?Sized> PropertySource for &P {
    fn property(&self, name: &str) -> Option<&str> {
        (**self).property(name)
    }
}

/// A property source with no properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProperties;

impl PropertySource for NoProperties {
    fn property(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// The properties of one input file.
///
/// - `Name`: the file name without its final extension
/// - `Extension`: the final extension without the dot (empty when absent)
/// - `DirectoryName`: the containing directory
/// - `FullName` and `Path`: the full path
///
/// # Example
///
/// ```
/// use batchx::{FileProperties, PropertySource};
///
/// let file = FileProperties::builder()
///     .directory_name("/videos")
///     .name("episode")
///     .extension("ts")
///     .full_name("/videos/episode.ts")
///     .build();
///
/// assert_eq!(file.property("Name"), Some("episode"));
/// assert_eq!(file.property("Path"), Some("/videos/episode.ts"));
/// assert_eq!(file.property("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize)]
#[builder(on(String, into))]
pub struct FileProperties {
    #[builder(default)]
    pub directory_name: String,

    #[builder(default)]
    pub name: String,

    #[builder(default)]
    pub extension: String,

    #[builder(default)]
    pub full_name: String,
}

impl FileProperties {
    /// Derives the properties of `path`.
    ///
    /// Relative paths are made absolute against the current directory when
    /// possible; the filesystem is not otherwise consulted.
    pub fn from_path(path: &Path) -> Self {
        let full = path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let lossy = |part: Option<&OsStr>| {
            part.map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        Self {
            directory_name: full
                .parent()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
            name: lossy(full.file_stem()),
            extension: lossy(full.extension()),
            full_name: full.to_string_lossy().into_owned(),
        }
    }
}

impl PropertySource for FileProperties {
    fn property(&self, name: &str) -> Option<&str> {
        match name {
            "Name" => Some(&self.name),
            "Extension" => Some(&self.extension),
            "DirectoryName" => Some(&self.directory_name),
            "FullName" | "Path" => Some(&self.full_name),
            _ => None,
        }
    }
}
