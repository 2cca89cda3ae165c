//! Error types for the overlay library

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Failed to create overlay window: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("No monitor available to size the overlay")]
    NoMonitor,

    #[error("Presentation surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error("Global hotkey error: {0}")]
    Hotkey(#[from] global_hotkey::Error),

    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("Settings file is malformed: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("No settings location is available")]
    SettingsUnavailable,

    #[error("Platform call failed: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
