use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::MAX_RECENT_COMICS;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Last opened or saved comic, reopened at startup
    #[serde(default)]
    pub last_comic_path: Option<PathBuf>,

    /// Recently opened comics, most recent first
    #[serde(default)]
    pub recent_comics: Vec<PathBuf>,

    /// Directory the export dialog opens in
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Font family given to new bubbles instead of the built-in default
    #[serde(default)]
    pub default_font_family: Option<String>,
}

impl AppConfigData {
    /// Move `path` to the front of the recent list.
    pub fn remember_comic(&mut self, path: PathBuf) {
        self.recent_comics.retain(|p| p != &path);
        self.recent_comics.insert(0, path.clone());
        self.recent_comics.truncate(MAX_RECENT_COMICS);
        self.last_comic_path = Some(path);
    }

    /// Drop recent entries whose files are gone. Returns how many were removed.
    pub fn prune_missing_comics(&mut self) -> usize {
        let before = self.recent_comics.len();
        self.recent_comics.retain(|p| p.exists());
        before - self.recent_comics.len()
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource for the "comic file missing" warning dialog
#[derive(Resource, Default)]
pub struct MissingComicWarning {
    pub show: bool,
    pub path: Option<PathBuf>,
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to record a comic as recently opened or saved
#[derive(Message)]
pub struct AddRecentComicRequest {
    pub path: PathBuf,
}

/// Message to remember the directory of the last export
#[derive(Message)]
pub struct SetExportDirRequest {
    pub path: PathBuf,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to check if the last comic still exists
fn check_last_comic_exists(
    mut config: ResMut<AppConfig>,
    mut warning: ResMut<MissingComicWarning>,
) {
    if let Some(path) = config.data.last_comic_path.clone()
        && !path.exists()
    {
        warning.show = true;
        warning.path = Some(path.clone());
        config.data.last_comic_path = None;
        config.dirty = true;
        info!("Last opened comic no longer exists: {:?}", path);
    }

    let pruned = config.data.prune_missing_comics();
    if pruned > 0 {
        debug!("Dropped {} missing comics from the recent list", pruned);
        config.dirty = true;
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add a comic to the recent list
fn add_recent_comic_system(
    mut events: MessageReader<AddRecentComicRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.remember_comic(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to remember the export directory
fn set_export_dir_system(
    mut events: MessageReader<SetExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.export_dir.as_ref() == Some(&event.path) {
            continue;
        }
        config.data.export_dir = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Set export directory to {:?}", event.path);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<MissingComicWarning>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentComicRequest>()
            .add_message::<SetExportDirRequest>()
            .add_systems(
                Startup,
                (load_config_system, check_last_comic_exists)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    add_recent_comic_system.run_if(on_message::<AddRecentComicRequest>),
                    set_export_dir_system.run_if(on_message::<SetExportDirRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
