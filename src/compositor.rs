//! Full-screen frame composition
//!
//! Every render rebuilds the whole frame from the configuration: a
//! transparent screen-sized canvas with the reticle drawn on top. Nothing
//! carries over between calls.

use crate::canvas::Canvas;
use crate::reticle::{ReticleConfig, ScreenSize};
use image::RgbaImage;

/// Color treated as "not drawn" by the host window (0RGB black)
pub const COLOR_KEY: u32 = 0x0000_0000;

#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    screen: ScreenSize,
}

impl Compositor {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Reticle center in screen coordinates
    pub fn center_for(&self, config: &ReticleConfig) -> (i32, i32) {
        (
            (self.screen.width / 2) as i32 + config.x_offset(),
            (self.screen.height / 2) as i32 + config.y_offset(),
        )
    }

    /// Render one frame for the given configuration
    pub fn render(&self, config: &ReticleConfig) -> RgbaImage {
        let mut canvas = Canvas::new(self.screen.width, self.screen.height);

        if config.is_visible() {
            config.shape().draw(
                &mut canvas,
                self.center_for(config),
                config.size(),
                config.pen(),
            );
        }

        canvas.into_image()
    }
}

/// Convert a frame to 0RGB pixels, mapping transparent pixels to the color key
pub fn color_keyed_pixels(frame: &RgbaImage) -> Vec<u32> {
    frame
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            if a == 0 {
                COLOR_KEY
            } else {
                ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            }
        })
        .collect()
}
