//! Reticle configuration
//!
//! `ReticleConfig` is the single owner of the visual parameters. Every
//! mutation is total: sizes and offsets clamp at their bounds, shape and
//! color wrap around. Values read back from a settings store are checked
//! differently: anything out of range is treated as corrupt and replaced by
//! the field's fallback rather than pinned to the nearest bound.

use crate::canvas::Pen;
use crate::config::{
    DEFAULT_PEN_WIDTH, DEFAULT_SIZE, FALLBACK_SIZE, MAX_PEN_WIDTH, MAX_SIZE, SIZE_STEP,
};
use crate::palette::{self, COLOR_COUNT};
use crate::settings::{
    SettingsStore, COLOR_KEY, SHAPE_KEY, SIZE_KEY, THICKNESS_KEY, X_OFFSET_KEY, Y_OFFSET_KEY,
};
use crate::shape::Shape;

/// Pixel dimensions of the primary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Largest displacement of the reticle from the screen center, per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetBounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl OffsetBounds {
    pub fn from_screen(screen: ScreenSize) -> Self {
        Self {
            max_x: (screen.width / 2) as i32,
            max_y: (screen.height / 2) as i32,
        }
    }
}

/// Direction of a one-pixel nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Increase,
    Decrease,
}

impl Nudge {
    fn delta(self) -> i32 {
        match self {
            Nudge::Increase => 1,
            Nudge::Decrease => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReticleConfig {
    shape: Shape,
    color: usize,
    size: i32,
    pen_width: i32,
    x_offset: i32,
    y_offset: i32,
    visible: bool,
    bounds: OffsetBounds,
}

impl ReticleConfig {
    /// Default reticle for a screen whose offsets are limited by `bounds`
    pub fn new(bounds: OffsetBounds) -> Self {
        Self {
            shape: Shape::Cross,
            color: 0,
            size: DEFAULT_SIZE,
            pen_width: DEFAULT_PEN_WIDTH,
            x_offset: 0,
            y_offset: 0,
            visible: true,
            bounds,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> usize {
        self.color
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn pen_width(&self) -> i32 {
        self.pen_width
    }

    pub fn x_offset(&self) -> i32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> i32 {
        self.y_offset
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bounds(&self) -> OffsetBounds {
        self.bounds
    }

    /// Pen for the current color and thickness
    pub fn pen(&self) -> Pen {
        Pen::new(palette::rgba(self.color), self.pen_width)
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn increase_size(&mut self) {
        self.size = (self.size + SIZE_STEP).clamp(1, MAX_SIZE);
    }

    pub fn decrease_size(&mut self) {
        self.size = (self.size - SIZE_STEP).clamp(1, MAX_SIZE);
    }

    pub fn increase_thickness(&mut self) {
        self.pen_width = (self.pen_width + 1).clamp(1, MAX_PEN_WIDTH);
    }

    pub fn decrease_thickness(&mut self) {
        self.pen_width = (self.pen_width - 1).clamp(1, MAX_PEN_WIDTH);
    }

    pub fn next_shape(&mut self) {
        self.shape = self.shape.next();
    }

    pub fn prev_shape(&mut self) {
        self.shape = self.shape.prev();
    }

    pub fn next_color(&mut self) {
        self.color = (self.color + 1) % COLOR_COUNT;
    }

    pub fn prev_color(&mut self) {
        self.color = (self.color + COLOR_COUNT - 1) % COLOR_COUNT;
    }

    pub fn nudge_x(&mut self, direction: Nudge) {
        let max = self.bounds.max_x;
        self.x_offset = (self.x_offset + direction.delta()).clamp(-max, max);
    }

    pub fn nudge_y(&mut self, direction: Nudge) {
        let max = self.bounds.max_y;
        self.y_offset = (self.y_offset + direction.delta()).clamp(-max, max);
    }

    pub fn center(&mut self) {
        self.x_offset = 0;
        self.y_offset = 0;
    }

    /// Replace every persisted field with the value from `store`.
    /// Missing or out-of-range values fall back to the field's default.
    /// Visibility is not persisted and is left untouched.
    pub fn load_from(&mut self, store: &dyn SettingsStore) {
        self.shape = read_in_range(store, SHAPE_KEY, 0, Shape::COUNT as i32 - 1)
            .and_then(|v| Shape::from_index(v as usize))
            .unwrap_or(Shape::Cross);

        self.color = read_in_range(store, COLOR_KEY, 0, COLOR_COUNT as i32 - 1)
            .map_or(0, |v| v as usize);

        self.size = read_in_range(store, SIZE_KEY, 1, MAX_SIZE).unwrap_or(FALLBACK_SIZE);

        self.pen_width =
            read_in_range(store, THICKNESS_KEY, 1, MAX_PEN_WIDTH).unwrap_or(DEFAULT_PEN_WIDTH);

        let OffsetBounds { max_x, max_y } = self.bounds;
        self.x_offset = read_in_range(store, X_OFFSET_KEY, -max_x, max_x).unwrap_or(0);
        self.y_offset = read_in_range(store, Y_OFFSET_KEY, -max_y, max_y).unwrap_or(0);
    }

    /// Write every persisted field to `store`.
    /// Returns true when all writes succeeded.
    pub fn save_to(&self, store: &mut dyn SettingsStore) -> bool {
        let values = [
            (SHAPE_KEY, self.shape.index() as i32),
            (COLOR_KEY, self.color as i32),
            (SIZE_KEY, self.size),
            (THICKNESS_KEY, self.pen_width),
            (X_OFFSET_KEY, self.x_offset),
            (Y_OFFSET_KEY, self.y_offset),
        ];

        // Attempt every key even after a failure
        values
            .iter()
            .fold(true, |ok, (key, value)| store.save(key, *value) && ok)
    }
}

fn read_in_range(store: &dyn SettingsStore, key: &str, min: i32, max: i32) -> Option<i32> {
    let value = store.load(key)?;
    if (min..=max).contains(&value) {
        Some(value)
    } else {
        tracing::warn!("Ignoring out-of-range setting {} = {}", key, value);
        None
    }
}
