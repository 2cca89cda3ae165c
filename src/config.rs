/// Configuration module for the crosshair overlay.
///
/// Holds the fixed application parameters (names, bounds, defaults, timing)
/// and resolves the platform-specific data directory where the persisted
/// reticle settings live (%APPDATA%/CrosshairOverlay/ on Windows).
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Application name, also used as the overlay window title
pub const APP_NAME: &str = "CrosshairOverlay";

/// File inside the data directory holding the persisted reticle settings
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Largest reticle half-extent in pixels
pub const MAX_SIZE: i32 = 100;

/// Largest pen width in pixels
pub const MAX_PEN_WIDTH: i32 = 4;

/// Size change per increase/decrease step
pub const SIZE_STEP: i32 = 2;

/// Reticle size on a fresh start
pub const DEFAULT_SIZE: i32 = 16;

/// Size used when a persisted value is missing or out of range
pub const FALLBACK_SIZE: i32 = 10;

/// Pen width on a fresh start and when a persisted value is invalid
pub const DEFAULT_PEN_WIDTH: i32 = 1;

/// How often the overlay re-asserts its topmost position
pub const TOPMOST_INTERVAL: Duration = Duration::from_millis(1000);

/// Get the application's data directory
/// Creates directory if it doesn't exist
pub fn get_data_directory() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow!("Failed to determine user data directory"))?;

    let data_dir = project_dirs.data_dir();

    fs::create_dir_all(data_dir)
        .map_err(|e| anyhow!("Failed to create data directory: {}", e))?;

    Ok(data_dir.to_path_buf())
}

/// Full path of the persisted settings file
pub fn settings_path() -> Result<PathBuf> {
    Ok(get_data_directory()?.join(SETTINGS_FILE_NAME))
}
