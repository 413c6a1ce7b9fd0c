//! Result types for async comic operations.

use std::path::PathBuf;

use crate::comic::ComicData;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub comic: Option<ComicData>,
    pub error: Option<String>,
}
