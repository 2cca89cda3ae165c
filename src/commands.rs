//! Overlay commands
//!
//! Each hotkey maps to exactly one command. Dispatching a command applies
//! one bounded change to the reticle configuration; the caller re-renders
//! afterwards unless the command asked to exit.

use crate::reticle::{Nudge, ReticleConfig};
use crate::settings::SettingsStore;
use global_hotkey::hotkey::{Code, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Exit,
    Toggle,
    NextShape,
    PrevShape,
    IncreaseSize,
    DecreaseSize,
    NextColor,
    PrevColor,
    IncreaseThickness,
    DecreaseThickness,
    IncreaseXOffset,
    DecreaseXOffset,
    IncreaseYOffset,
    DecreaseYOffset,
    Center,
    LoadSettings,
    SaveSettings,
}

/// What the dispatch loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Render,
    Exit,
}

impl Command {
    /// All commands, ordered by id
    pub const ALL: [Command; 17] = [
        Command::Exit,
        Command::Toggle,
        Command::NextShape,
        Command::PrevShape,
        Command::IncreaseSize,
        Command::DecreaseSize,
        Command::NextColor,
        Command::PrevColor,
        Command::IncreaseThickness,
        Command::DecreaseThickness,
        Command::IncreaseXOffset,
        Command::DecreaseXOffset,
        Command::IncreaseYOffset,
        Command::DecreaseYOffset,
        Command::Center,
        Command::LoadSettings,
        Command::SaveSettings,
    ];

    const FIRST_ID: u32 = 1000;

    /// Stable numeric id of the command
    pub fn id(self) -> u32 {
        Self::FIRST_ID + self as u32
    }

    pub fn from_id(id: u32) -> Option<Command> {
        let index = id.checked_sub(Self::FIRST_ID)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Default key binding for the command
    pub fn default_binding(self) -> (Option<Modifiers>, Code) {
        let ctrl = Some(Modifiers::CONTROL);
        match self {
            Command::Exit => (None, Code::F9),
            Command::Toggle => (None, Code::F1),
            Command::IncreaseXOffset => (None, Code::F2),
            Command::DecreaseXOffset => (ctrl, Code::F2),
            Command::IncreaseYOffset => (None, Code::F3),
            Command::DecreaseYOffset => (ctrl, Code::F3),
            Command::Center => (None, Code::F4),
            Command::NextShape => (None, Code::F5),
            Command::PrevShape => (ctrl, Code::F5),
            Command::NextColor => (None, Code::F6),
            Command::PrevColor => (ctrl, Code::F6),
            Command::IncreaseSize => (None, Code::F7),
            Command::DecreaseSize => (ctrl, Code::F7),
            Command::IncreaseThickness => (None, Code::F8),
            Command::DecreaseThickness => (ctrl, Code::F8),
            Command::LoadSettings => (None, Code::F10),
            Command::SaveSettings => (None, Code::F11),
        }
    }
}

/// Apply one command to the configuration
pub fn dispatch(
    command: Command,
    config: &mut ReticleConfig,
    store: &mut dyn SettingsStore,
) -> Dispatch {
    match command {
        Command::Exit => return Dispatch::Exit,
        Command::Toggle => config.toggle_visible(),
        Command::NextShape => config.next_shape(),
        Command::PrevShape => config.prev_shape(),
        Command::IncreaseSize => config.increase_size(),
        Command::DecreaseSize => config.decrease_size(),
        Command::NextColor => config.next_color(),
        Command::PrevColor => config.prev_color(),
        Command::IncreaseThickness => config.increase_thickness(),
        Command::DecreaseThickness => config.decrease_thickness(),
        Command::IncreaseXOffset => config.nudge_x(Nudge::Increase),
        Command::DecreaseXOffset => config.nudge_x(Nudge::Decrease),
        Command::IncreaseYOffset => config.nudge_y(Nudge::Increase),
        Command::DecreaseYOffset => config.nudge_y(Nudge::Decrease),
        Command::Center => config.center(),
        Command::LoadSettings => match store.reload() {
            Ok(()) => {
                config.load_from(store);
                tracing::info!("Settings loaded");
            }
            Err(e) => tracing::warn!("Failed to read settings, keeping current reticle: {}", e),
        },
        Command::SaveSettings => {
            if config.save_to(store) {
                tracing::info!("Settings saved");
            } else {
                tracing::warn!("Some settings could not be saved");
            }
        }
    }

    tracing::debug!(
        "{:?}: shape={} color={} size={} pen={} offset=({}, {}) visible={}",
        command,
        config.shape(),
        crate::palette::color_name(config.color()),
        config.size(),
        config.pen_width(),
        config.x_offset(),
        config.y_offset(),
        config.is_visible()
    );

    Dispatch::Render
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OverlayError, Result};
    use crate::reticle::{OffsetBounds, ScreenSize};
    use crate::settings::{open_settings, DetachedStore, MemoryStore, SIZE_KEY};
    use crate::shape::Shape;
    use std::collections::HashSet;

    fn config() -> ReticleConfig {
        ReticleConfig::new(OffsetBounds::from_screen(ScreenSize::new(1920, 1080)))
    }

    /// Store whose backing storage can never be read or written
    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn load(&self, _key: &str) -> Option<i32> {
            None
        }

        fn save(&mut self, _key: &str, _value: i32) -> bool {
            false
        }

        fn reload(&mut self) -> Result<()> {
            Err(OverlayError::Platform("storage unavailable".into()))
        }
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(Command::Exit.id(), 1000);
        assert_eq!(Command::Toggle.id(), 1001);
        assert_eq!(Command::DecreaseThickness.id(), 1009);
        assert_eq!(Command::SaveSettings.id(), 1016);
        for command in Command::ALL {
            assert_eq!(Command::from_id(command.id()), Some(command));
        }
        assert_eq!(Command::from_id(999), None);
        assert_eq!(Command::from_id(1017), None);
    }

    #[test]
    fn test_default_bindings_are_unique() {
        let bindings: HashSet<_> = Command::ALL
            .iter()
            .map(|c| {
                let (mods, code) = c.default_binding();
                (mods.map(|m| m.bits()), code)
            })
            .collect();
        assert_eq!(bindings.len(), Command::ALL.len());
    }

    #[test]
    fn test_exit_leaves_config_alone() {
        let mut c = config();
        let before = c.clone();
        assert_eq!(
            dispatch(Command::Exit, &mut c, &mut MemoryStore::new()),
            Dispatch::Exit
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_every_other_command_renders() {
        let mut c = config();
        let mut store = MemoryStore::new();
        for command in Command::ALL.iter().filter(|c| **c != Command::Exit) {
            assert_eq!(dispatch(*command, &mut c, &mut store), Dispatch::Render);
        }
    }

    #[test]
    fn test_commands_mutate_config() {
        let mut c = config();
        let mut store = MemoryStore::new();

        dispatch(Command::NextShape, &mut c, &mut store);
        assert_eq!(c.shape(), Shape::CrossPenGap);

        dispatch(Command::PrevColor, &mut c, &mut store);
        assert_eq!(c.color(), 7);

        dispatch(Command::DecreaseSize, &mut c, &mut store);
        assert_eq!(c.size(), 14);

        dispatch(Command::IncreaseThickness, &mut c, &mut store);
        assert_eq!(c.pen_width(), 2);

        dispatch(Command::DecreaseXOffset, &mut c, &mut store);
        dispatch(Command::IncreaseYOffset, &mut c, &mut store);
        assert_eq!((c.x_offset(), c.y_offset()), (-1, 1));

        dispatch(Command::Center, &mut c, &mut store);
        assert_eq!((c.x_offset(), c.y_offset()), (0, 0));

        dispatch(Command::Toggle, &mut c, &mut store);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_save_then_load_restores_snapshot() {
        let mut c = config();
        let mut store = MemoryStore::new();

        dispatch(Command::NextColor, &mut c, &mut store);
        dispatch(Command::IncreaseSize, &mut c, &mut store);
        dispatch(Command::SaveSettings, &mut c, &mut store);
        let saved = c.clone();

        dispatch(Command::NextColor, &mut c, &mut store);
        dispatch(Command::IncreaseSize, &mut c, &mut store);
        dispatch(Command::LoadSettings, &mut c, &mut store);
        assert_eq!(c, saved);
        assert_eq!(store.load(SIZE_KEY), Some(18));
    }

    #[test]
    fn test_unreadable_store_keeps_config() {
        let mut c = config();
        dispatch(Command::NextShape, &mut c, &mut BrokenStore);
        let before = c.clone();

        assert_eq!(
            dispatch(Command::LoadSettings, &mut c, &mut BrokenStore),
            Dispatch::Render
        );
        assert_eq!(c, before);

        assert_eq!(
            dispatch(Command::SaveSettings, &mut c, &mut BrokenStore),
            Dispatch::Render
        );
    }

    #[test]
    fn test_load_without_settings_location_keeps_config() {
        let mut c = config();
        let mut store = DetachedStore;
        for _ in 0..5 {
            dispatch(Command::IncreaseSize, &mut c, &mut store);
        }
        dispatch(Command::NextColor, &mut c, &mut store);
        let before = c.clone();

        dispatch(Command::LoadSettings, &mut c, &mut store);
        assert_eq!(c, before);
        assert_eq!((c.size(), c.color()), (26, 1));
    }

    #[test]
    fn test_save_repairs_unreadable_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let mut c = config();
        let mut store = open_settings(Some(path.clone()), &mut c);
        dispatch(Command::IncreaseSize, &mut c, store.as_mut());
        let before = c.clone();

        dispatch(Command::LoadSettings, &mut c, store.as_mut());
        assert_eq!(c, before);

        dispatch(Command::SaveSettings, &mut c, store.as_mut());
        dispatch(Command::DecreaseSize, &mut c, store.as_mut());
        dispatch(Command::LoadSettings, &mut c, store.as_mut());
        assert_eq!(c, before);
        assert_eq!(store.load(SIZE_KEY), Some(18));
    }
}
