//! Comic persistence: saving and loading comic files.
//!
//! Handles async file I/O for comic data, including:
//! - Save/load with async task pooling
//! - Normalizing loaded overlays and laying out bubbles for bare scripts
//! - Dirty state tracking
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for comic operations
//! - [`resources`] - Resource types for state tracking
//! - [`results`] - Result types for async operations
//! - [`helpers`] - Encoding, decoding and directory creation
//! - [`save`] - Save system and task polling
//! - [`load`] - Load system and task polling
//! - [`comic_state`] - New comic system
//!
//! ## Key Types
//!
//! - [`ComicDirtyState`] - Tracks unsaved changes
//! - [`AsyncComicOperation`] - Tracks async I/O state
//! - [`CurrentComicFile`] - Path of the open comic
//!
//! ## Systems
//!
//! - [`save_comic_system`] - Starts async save operation
//! - [`poll_save_tasks`] - Polls save task completion
//! - [`load_comic_system`] - Starts async load operation
//! - [`poll_load_tasks`] - Polls load task completion
//! - [`new_comic_system`] - Replaces the comic with a blank one
//! - [`open_last_comic`] - Reopens the previous session's comic at startup

mod comic_state;
mod helpers;
mod load;
mod messages;
mod resources;
mod results;
mod save;


// Re-exports - Messages
pub use messages::{ComicReplaced, LoadComicRequest, NewComicRequest, SaveComicRequest};

// Re-exports - Resources
pub use resources::{
    AsyncComicOperation, ComicDirtyState, ComicLoadError, ComicSaveError, CurrentComicFile,
};

// Re-exports - Helpers
pub use helpers::{decode_comic, encode_comic, ensure_comics_directory, file_label};

// Re-exports - Systems
pub use comic_state::new_comic_system;
pub use load::{load_comic_system, open_last_comic, poll_load_tasks};
pub use save::{poll_save_tasks, save_comic_system};
