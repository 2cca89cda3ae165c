//! Fixed set of selectable reticle colors

use image::Rgba;

/// Opaque RGB triple
pub type Rgb = [u8; 3];

/// Selectable colors, in cycling order.
/// Black is reserved as the transparency key and must never appear here.
pub const PALETTE: [Rgb; 8] = [
    [255, 0, 0],     // red
    [0, 255, 0],     // green
    [0, 0, 255],     // blue
    [0, 255, 255],   // cyan
    [255, 255, 0],   // yellow
    [255, 0, 255],   // pink
    [255, 255, 255], // white
    [128, 128, 128], // gray
];

const NAMES: [&str; 8] = [
    "red", "green", "blue", "cyan", "yellow", "pink", "white", "gray",
];

/// Number of palette entries
pub const COLOR_COUNT: usize = PALETTE.len();

/// Fully opaque pixel value for a palette index
pub fn rgba(index: usize) -> Rgba<u8> {
    let [r, g, b] = PALETTE[index % COLOR_COUNT];
    Rgba([r, g, b, 255])
}

/// Display name for a palette index
pub fn color_name(index: usize) -> &'static str {
    NAMES[index % COLOR_COUNT]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_never_contains_key_color() {
        assert!(PALETTE.iter().all(|c| *c != [0, 0, 0]));
    }

    #[test]
    fn test_rgba_is_opaque() {
        for i in 0..COLOR_COUNT {
            assert_eq!(rgba(i).0[3], 255);
        }
        assert_eq!(rgba(7), Rgba([128, 128, 128, 255]));
        assert_eq!(color_name(5), "pink");
    }
}
