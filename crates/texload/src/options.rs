//! Read options and file lookup.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Environment variable holding extra directories to search for textures,
/// in the platform's path-list syntax.
pub const FILE_PATH_ENV: &str = "TEXLOAD_FILE_PATH";

/// Options controlling how a texture is located and recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    extension_hint: Option<String>,
    search_paths: Vec<PathBuf>,
}

impl ReadOptions {
    /// Options with no hint and no search paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options whose search paths come from [`FILE_PATH_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os(FILE_PATH_ENV) {
            Some(list) => Self::from_path_list(&list),
            None => Self::default(),
        }
    }

    /// Options whose search paths are parsed from a path list such as
    /// `/a:/b` on Unix.
    #[must_use]
    pub fn from_path_list(list: &OsStr) -> Self {
        Self {
            extension_hint: None,
            search_paths: std::env::split_paths(list)
                .filter(|path| !path.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Set the extension used to recognize streams with no path. The hint is
    /// stored lower-case without a leading dot.
    #[must_use]
    pub fn with_extension_hint(mut self, extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref().trim_start_matches('.');
        self.extension_hint = Some(extension.to_ascii_lowercase());
        self
    }

    /// Append a directory to search.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn extension_hint(&self) -> Option<&str> {
        self.extension_hint.as_deref()
    }

    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve `path`: the path itself if it exists, else the first search
    /// path that contains it.
    #[must_use]
    pub fn find_file(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        let path = path.as_ref();
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        if path.is_absolute() {
            return None;
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }
}

/// Lower-cased extension of a file path.
#[must_use]
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
}

/// Lower-cased extension of a URL's last path segment, ignoring any query
/// string or fragment.
#[must_use]
pub fn url_extension(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let path = path.split_once("://").map_or(path, |(_, rest)| rest);
    let (_, segment) = path.rsplit_once('/')?;
    let (stem, extension) = segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
