//! Overlay window - the host display surface
//!
//! A borderless, always-on-top, click-through window covering the primary
//! screen. Frames are presented through softbuffer as a whole-surface
//! replace. On Windows the window is made layered with black as the color
//! key, so every undrawn pixel is invisible and passes input through.

use crate::compositor::color_keyed_pixels;
use crate::config::APP_NAME;
use crate::error::{OverlayError, Result};
use crate::reticle::ScreenSize;
use image::RgbaImage;
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use tracing::{debug, info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder, WindowId, WindowLevel};

/// Size of the primary monitor, or of the first one found
pub fn primary_screen<T>(target: &EventLoopWindowTarget<T>) -> Result<ScreenSize> {
    let monitor = target
        .primary_monitor()
        .or_else(|| target.available_monitors().next())
        .ok_or(OverlayError::NoMonitor)?;

    let size = monitor.size();
    Ok(ScreenSize::new(size.width, size.height))
}

pub struct OverlayWindow {
    window: Rc<Window>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    _context: Context<Rc<Window>>,
    screen: ScreenSize,
}

impl OverlayWindow {
    /// Create the overlay covering `screen`. The window starts shown but
    /// never takes focus or input.
    pub fn create<T>(target: &EventLoopWindowTarget<T>, screen: ScreenSize) -> Result<Self> {
        let builder = WindowBuilder::new()
            .with_title(APP_NAME)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_active(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_position(PhysicalPosition::new(0, 0))
            .with_inner_size(PhysicalSize::new(screen.width, screen.height));

        #[cfg(windows)]
        let builder = {
            use winit::platform::windows::WindowBuilderExtWindows;
            builder.with_skip_taskbar(true)
        };

        let window = Rc::new(builder.build(target)?);

        if let Err(e) = window.set_cursor_hittest(false) {
            warn!("Click-through not supported by this platform: {}", e);
        }

        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;

        #[cfg(windows)]
        {
            win32::make_layered(&window)?;
            win32::show_inactive(&window)?;
        }

        #[cfg(not(windows))]
        {
            window.set_visible(true);
            warn!("Color-key transparency depends on the compositor on this platform");
        }

        info!("Overlay window created ({}x{})", screen.width, screen.height);

        Ok(Self {
            window,
            surface,
            _context: context,
            screen,
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Replace the displayed image with `frame`
    pub fn present(&mut self, frame: &RgbaImage) -> Result<()> {
        let (width, height) = frame.dimensions();
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(OverlayError::Platform(format!(
                "cannot present an empty {}x{} frame",
                width, height
            )));
        };

        self.surface.resize(w, h)?;

        let mut buffer = self.surface.buffer_mut()?;
        for (dst, src) in buffer.iter_mut().zip(color_keyed_pixels(frame)) {
            *dst = src;
        }
        buffer.present()?;

        Ok(())
    }

    /// Put the overlay back on top of the z-order without moving, resizing
    /// or activating it
    pub fn reassert_topmost(&self) {
        #[cfg(windows)]
        win32::reassert_topmost(&self.window);

        #[cfg(not(windows))]
        self.window.set_window_level(WindowLevel::AlwaysOnTop);

        debug!("Topmost position re-asserted");
    }
}

/// Whether another overlay window is already up
pub fn another_instance_running() -> bool {
    #[cfg(windows)]
    {
        win32::window_exists(APP_NAME)
    }

    #[cfg(not(windows))]
    {
        false
    }
}

#[cfg(windows)]
mod win32 {
    use crate::error::{OverlayError, Result};
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{BOOL, COLORREF, HWND};
    use windows::Win32::UI::Input::KeyboardAndMouse::EnableWindow;
    use windows::Win32::UI::WindowsAndMessaging::{
        FindWindowW, GetWindowLongPtrW, SetLayeredWindowAttributes, SetWindowLongPtrW,
        SetWindowPos, ShowWindow, GWL_EXSTYLE, HWND_TOPMOST, LWA_COLORKEY, SWP_NOACTIVATE,
        SWP_NOMOVE, SWP_NOSIZE, SW_SHOWNOACTIVATE, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
        WS_EX_TRANSPARENT,
    };
    use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use winit::window::Window;

    fn hwnd(window: &Window) -> Result<HWND> {
        let handle = window
            .window_handle()
            .map_err(|e| OverlayError::Platform(format!("no window handle: {}", e)))?;

        match handle.as_raw() {
            RawWindowHandle::Win32(h) => Ok(HWND(h.hwnd.get())),
            other => Err(OverlayError::Platform(format!(
                "unexpected window handle: {:?}",
                other
            ))),
        }
    }

    /// Layered, click-through, never-activated, disabled, black color key
    pub fn make_layered(window: &Window) -> Result<()> {
        let hwnd = hwnd(window)?;

        unsafe {
            let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
            let overlay = (WS_EX_LAYERED
                | WS_EX_TRANSPARENT
                | WS_EX_TOPMOST
                | WS_EX_TOOLWINDOW
                | WS_EX_NOACTIVATE)
                .0 as isize;
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style | overlay);

            SetLayeredWindowAttributes(hwnd, COLORREF(0), 0, LWA_COLORKEY)
                .map_err(|e| OverlayError::Platform(format!("SetLayeredWindowAttributes: {}", e)))?;

            let _ = EnableWindow(hwnd, BOOL::from(false));
        }

        reassert_topmost(window);
        Ok(())
    }

    /// Show the window without activating it. Called once the layered
    /// attributes are in place so it never appears without them.
    pub fn show_inactive(window: &Window) -> Result<()> {
        let hwnd = hwnd(window)?;
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        }
        Ok(())
    }

    pub fn reassert_topmost(window: &Window) {
        let Ok(hwnd) = hwnd(window) else {
            return;
        };

        unsafe {
            if let Err(e) = SetWindowPos(
                hwnd,
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            ) {
                tracing::warn!("SetWindowPos failed: {}", e);
            }
        }
    }

    pub fn window_exists(title: &str) -> bool {
        let title: Vec<u16> = title.encode_utf16().chain(Some(0)).collect();
        let found = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(title.as_ptr())) };
        found.0 != 0
    }
}
