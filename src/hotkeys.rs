//! Hotkey Manager - Global hotkey registration
//!
//! Uses the global-hotkey crate. On Windows the hotkeys are delivered through
//! the thread's message loop, so the manager must be created on the thread
//! that runs the event loop.

use crate::commands::Command;
use crate::error::Result;
use global_hotkey::{hotkey::HotKey, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Registered hotkeys and the command each one triggers.
/// Hotkeys stay registered for as long as this value lives.
pub struct HotkeyBindings {
    manager: GlobalHotKeyManager,
    commands: HashMap<u32, Command>,
}

impl HotkeyBindings {
    /// Register the default binding of every command.
    /// A binding that cannot be registered (e.g. already taken by another
    /// application) is skipped; the others keep working.
    pub fn register_defaults() -> Result<Self> {
        let manager = GlobalHotKeyManager::new()?;
        let mut commands = HashMap::new();

        for command in Command::ALL {
            let (mods, code) = command.default_binding();
            let hotkey = HotKey::new(mods, code);

            match manager.register(hotkey) {
                Ok(()) => {
                    debug!("Registered hotkey for {:?}: {:?}", command, hotkey);
                    commands.insert(hotkey.id(), command);
                }
                Err(e) => warn!("Failed to register hotkey for {:?}: {}", command, e),
            }
        }

        info!("Registered {} of {} hotkeys", commands.len(), Command::ALL.len());

        Ok(Self { manager, commands })
    }

    /// Lookup table from hotkey id to command, for use on another thread
    pub fn command_table(&self) -> HashMap<u32, Command> {
        self.commands.clone()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Drop for HotkeyBindings {
    fn drop(&mut self) {
        for (id, command) in &self.commands {
            let (mods, code) = command.default_binding();
            if let Err(e) = self.manager.unregister(HotKey::new(mods, code)) {
                warn!("Failed to unregister hotkey {}: {}", id, e);
            }
        }
    }
}

/// Route pressed hotkeys to `forward`. Replaces any previous handler.
pub fn forward_events<F>(table: HashMap<u32, Command>, forward: F)
where
    F: Fn(Command) + Send + Sync + 'static,
{
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if event.state != HotKeyState::Pressed {
            return;
        }
        if let Some(command) = table.get(&event.id) {
            forward(*command);
        }
    }));
}
