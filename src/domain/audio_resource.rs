use std::path::{Path, PathBuf};

/// Extension assumed when the URL path carries none.
pub const DEFAULT_EXTENSION: &str = ".wav";

/// Audio fetched from a remote URL into a scratch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResource {
    pub source_url: String,
    pub extension: String,
    pub local_path: PathBuf,
}

impl AudioResource {
    pub fn new(source_url: impl Into<String>, extension: impl Into<String>, local_path: PathBuf) -> Self {
        Self {
            source_url: source_url.into(),
            extension: extension.into(),
            local_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.local_path
    }
}

/// Lowercased extension (with leading dot) of the URL's path component.
///
/// Query string and fragment are ignored. Anything that is not a plain
/// alphanumeric extension falls back to [`DEFAULT_EXTENSION`], so the result
/// is always safe to embed in a scratch filename.
pub fn detect_extension(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();

    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|idx| &rest[idx..]).unwrap_or(""),
        None => without_query,
    };

    let file_name = path.rsplit('/').next().unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
