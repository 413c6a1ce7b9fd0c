//! Helper functions for comic persistence.

use bevy::prelude::*;
use std::path::Path;

use crate::comic::{COMIC_FILE_VERSION, ComicData, SavedComic};

pub fn ensure_comics_directory() {
    let comics_dir = crate::paths::comics_dir();
    if !comics_dir.exists()
        && let Err(e) = std::fs::create_dir_all(&comics_dir)
    {
        warn!("Failed to create comics directory: {}", e);
    }
}

/// File name of `path` for status text, or `fallback` if it has none.
pub fn file_label(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fallback)
        .to_string()
}

pub fn encode_comic(comic: &ComicData) -> Result<String, String> {
    serde_json::to_string_pretty(&SavedComic::from_comic(comic))
        .map_err(|e| format!("Failed to serialize comic: {}", e))
}

/// Parse a comic file. Overlays are normalized and a script without any
/// bubbles gets one per dialogue line.
pub fn decode_comic(json: &str) -> Result<ComicData, String> {
    let saved: SavedComic =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse comic file: {}", e))?;

    if saved.version > COMIC_FILE_VERSION {
        return Err(format!(
            "Comic file version {} is newer than supported version {}",
            saved.version, COMIC_FILE_VERSION
        ));
    }

    let mut comic = saved.comic;
    comic.normalize();
    let filled = comic.populate_missing_overlays();
    if filled > 0 {
        debug!("Laid out bubbles for {} panels from dialogue", filled);
    }
    Ok(comic)
}
