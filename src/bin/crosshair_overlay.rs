//! Crosshair overlay process
//!
//! Draws the reticle in a transparent, click-through window on top of
//! everything else and adjusts it through global hotkeys.
//!
//! Threads:
//! - Main thread runs the event loop; every hotkey becomes a user event that
//!   mutates the reticle and re-renders it before the next event is handled
//! - The topmost keeper only posts reassert requests into the same loop

#![windows_subsystem = "windows"]

use anyhow::{Context, Result};
use crosshair_overlay::commands::{self, Command, Dispatch};
use crosshair_overlay::compositor::Compositor;
use crosshair_overlay::config;
use crosshair_overlay::hotkeys::{self, HotkeyBindings};
use crosshair_overlay::overlay::{self, OverlayWindow};
use crosshair_overlay::reticle::{OffsetBounds, ReticleConfig};
use crosshair_overlay::settings;
use crosshair_overlay::topmost::TopmostKeeper;
use parking_lot::Mutex;
use tracing::{error, info, warn};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};

/// Events posted into the dispatch loop from outside it
#[derive(Debug, Clone, Copy)]
enum OverlayEvent {
    Command(Command),
    ReassertTopmost,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("CrosshairOverlay starting...");

    if overlay::another_instance_running() {
        info!("Overlay already running, exiting");
        return Ok(());
    }

    run().map_err(|e| {
        error!("{:#}", e);
        show_error_dialog(&format!("{:#}", e));
        e
    })?;

    info!("CrosshairOverlay shutting down");
    Ok(())
}

fn run() -> Result<()> {
    let event_loop = EventLoopBuilder::<OverlayEvent>::with_user_event()
        .build()
        .context("Could not create the event loop")?;

    let screen = overlay::primary_screen(&event_loop)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Could not query the screen")?;
    let mut window =
        OverlayWindow::create(&event_loop, screen)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Could not create the overlay window")?;

    let mut reticle = ReticleConfig::new(OffsetBounds::from_screen(screen));
    let settings_path = match config::settings_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("No settings location available: {:#}", e);
            None
        }
    };
    let mut store = settings::open_settings(settings_path, &mut reticle);

    let compositor = Compositor::new(window.screen());
    render(&compositor, &reticle, &mut window);

    // Must be created on the event loop thread
    let bindings =
        HotkeyBindings::register_defaults()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Could not set up global hotkeys")?;
    if bindings.is_empty() {
        warn!("No hotkeys could be registered; the overlay can only be closed externally");
    }

    let hotkey_proxy = Mutex::new(event_loop.create_proxy());
    hotkeys::forward_events(bindings.command_table(), move |command| {
        let _ = hotkey_proxy.lock().send_event(OverlayEvent::Command(command));
    });

    let keeper_proxy = event_loop.create_proxy();
    let _keeper = TopmostKeeper::spawn(config::TOPMOST_INTERVAL, move || {
        keeper_proxy
            .send_event(OverlayEvent::ReassertTopmost)
            .is_ok()
    })
    .context("Could not start the topmost keeper")?;

    info!("Overlay ready, {} hotkeys active", bindings.len());

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(OverlayEvent::Command(command)) => {
                    match commands::dispatch(command, &mut reticle, store.as_mut()) {
                        Dispatch::Render => render(&compositor, &reticle, &mut window),
                        Dispatch::Exit => {
                            info!("Exit requested");
                            elwt.exit();
                        }
                    }
                }

                Event::UserEvent(OverlayEvent::ReassertTopmost) => window.reassert_topmost(),

                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                        WindowEvent::RedrawRequested => render(&compositor, &reticle, &mut window),
                        _ => {}
                    }
                }

                _ => {}
            }
        })
        .context("Event loop failed")?;

    Ok(())
}

/// Render and present one frame; a failed frame is logged and skipped
fn render(compositor: &Compositor, reticle: &ReticleConfig, window: &mut OverlayWindow) {
    let frame = compositor.render(reticle);
    if let Err(e) = window.present(&frame) {
        error!("Dropped frame: {}", e);
    }
}

#[cfg(windows)]
fn show_error_dialog(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(not(windows))]
fn show_error_dialog(_message: &str) {
    // No dialog toolkit outside Windows; the error is already logged
}
