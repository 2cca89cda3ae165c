//! Crosshair Overlay Library
//!
//! Renders a configurable aiming reticle into a transparent full-screen
//! frame and keeps it on top of every other window.
//!
//! Architecture:
//! - `reticle` owns the configuration and its bounded mutations
//! - `shape` and `canvas` draw the reticle, `compositor` builds whole frames
//! - `commands` maps hotkeys to configuration changes
//! - `overlay`, `hotkeys` and `topmost` talk to the host platform

pub mod canvas;
pub mod commands;
pub mod compositor;
pub mod config;
pub mod error;
pub mod hotkeys;
pub mod overlay;
pub mod palette;
pub mod reticle;
pub mod settings;
pub mod shape;
pub mod topmost;

pub use error::{OverlayError, Result};
