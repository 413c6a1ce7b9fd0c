//! Resource types for comic persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::{LoadResult, SaveResult};

#[derive(Resource, Default)]
pub struct ComicLoadError {
    pub message: Option<String>,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct ComicSaveError {
    pub message: Option<String>,
}

/// Resource tracking async comic I/O operations for modal dialog
#[derive(Resource, Default)]
pub struct AsyncComicOperation {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// Whether a load operation is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncComicOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }

    pub fn start(&mut self, saving: bool, description: String) {
        if saving {
            self.is_saving = true;
        } else {
            self.is_loading = true;
        }
        self.operation_description = Some(description);
    }

    pub fn finish(&mut self) {
        self.is_saving = false;
        self.is_loading = false;
        self.operation_description = None;
    }
}

/// Component for save task
#[derive(Component)]
pub struct SaveComicTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadComicTask(pub Task<LoadResult>);

/// Resource tracking the currently open comic file path
#[derive(Resource, Default)]
pub struct CurrentComicFile {
    pub path: Option<PathBuf>,
}

impl CurrentComicFile {
    /// Window title fragment for the open file
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .map(|p| super::helpers::file_label(p, "Untitled"))
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// Resource tracking if the current comic has unsaved changes
#[derive(Resource, Default)]
pub struct ComicDirtyState {
    pub is_dirty: bool,
}
