//! Message types for comic persistence operations.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::comic::ComicFormat;

#[derive(Message)]
pub struct SaveComicRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadComicRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct NewComicRequest {
    pub format: ComicFormat,
}

/// Sent after the whole comic was swapped out (new or loaded), so editor
/// state that points into the old comic can be dropped.
#[derive(Message)]
pub struct ComicReplaced;
