//! Drawing primitives on an RGBA frame
//!
//! Every primitive writes fully opaque pixels and clips silently at the
//! canvas border, so shapes may hang off any edge of the screen.

use image::{Rgba, RgbaImage};

/// Fully transparent pixel, the background of every fresh canvas
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Solid stroke description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Rgba<u8>,
    pub width: i32,
}

impl Pen {
    pub fn new(color: Rgba<u8>, width: i32) -> Self {
        Self {
            color,
            width: width.max(1),
        }
    }

    /// Offset of the first covered row/column relative to the centerline
    fn lead(&self) -> i32 {
        -(self.width / 2)
    }
}

/// Transparent canvas that shapes are drawn onto
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel at (x, y), or None outside the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if self.contains(x, y) {
            Some(*self.image.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Whether (x, y) holds a drawn (opaque) pixel
    pub fn is_drawn(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).is_some_and(|p| p.0[3] != 0)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.contains(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill the `width` x `height` block whose top-left corner is (x, y)
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba<u8>) {
        if width <= 0 || height <= 0 {
            return;
        }
        // Clamp to the canvas up front so huge rectangles stay cheap
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.image.width() as i32);
        let y1 = (y + height).min(self.image.height() as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Stroke a line from (x0, y0) to (x1, y1), both endpoints included.
    /// The pen is centered on the line and has flat caps.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pen: Pen) {
        let lead = pen.lead();

        if y0 == y1 {
            let left = x0.min(x1);
            let len = (x1 - x0).abs() + 1;
            self.fill_rect(left, y0 + lead, len, pen.width, pen.color);
            return;
        }

        if x0 == x1 {
            let top = y0.min(y1);
            let len = (y1 - y0).abs() + 1;
            self.fill_rect(x0 + lead, top, pen.width, len, pen.color);
            return;
        }

        // General case: Bresenham, stamping a square pen at each step
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.fill_rect(x + lead, y + lead, pen.width, pen.width, pen.color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Stroke the outline of the rectangle spanning (x, y) to (x + width, y + height)
    pub fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32, pen: Pen) {
        let right = x + width;
        let bottom = y + height;
        self.draw_line(x, y, right, y, pen);
        self.draw_line(x, bottom, right, bottom, pen);
        self.draw_line(x, y, x, bottom, pen);
        self.draw_line(right, y, right, bottom, pen);
    }

    /// Stroke an axis-aligned ellipse centered on (cx, cy) with radii (rx, ry).
    /// The ring is `pen.width` thick, centered on the nominal outline.
    pub fn stroke_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, pen: Pen) {
        let half = pen.width as f32 / 2.0;
        let (outer_x, outer_y) = (rx as f32 + half, ry as f32 + half);
        let (inner_x, inner_y) = (rx as f32 - half, ry as f32 - half);
        let hollow = inner_x > 0.0 && inner_y > 0.0;

        let reach_x = rx + pen.width;
        let reach_y = ry + pen.width;
        for py in (cy - reach_y)..=(cy + reach_y) {
            for px in (cx - reach_x)..=(cx + reach_x) {
                let dx = (px - cx) as f32;
                let dy = (py - cy) as f32;

                let outer = (dx / outer_x).powi(2) + (dy / outer_y).powi(2);
                if outer > 1.0 {
                    continue;
                }
                if hollow {
                    let inner = (dx / inner_x).powi(2) + (dy / inner_y).powi(2);
                    if inner < 1.0 {
                        continue;
                    }
                }
                self.put(px, py, pen.color);
            }
        }
    }

    /// Number of opaque pixels on the canvas
    pub fn drawn_pixel_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 4);
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 4);
        assert_eq!(canvas.drawn_pixel_count(), 0);
    }

    #[test]
    fn test_horizontal_line_thickness() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line(2, 10, 6, 10, Pen::new(RED, 3));

        // 5 columns x 3 rows, centered on row 10
        assert_eq!(canvas.drawn_pixel_count(), 15);
        assert!(canvas.is_drawn(2, 9));
        assert!(canvas.is_drawn(6, 11));
        assert!(!canvas.is_drawn(7, 10));
        assert!(!canvas.is_drawn(4, 12));
    }

    #[test]
    fn test_vertical_line_reversed_endpoints() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line(5, 8, 5, 3, Pen::new(RED, 1));
        assert_eq!(canvas.drawn_pixel_count(), 6);
        assert!(canvas.is_drawn(5, 3));
        assert!(canvas.is_drawn(5, 8));
    }

    #[test]
    fn test_diagonal_line_hits_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0, 0, 9, 9, Pen::new(RED, 1));
        assert_eq!(canvas.drawn_pixel_count(), 10);
        assert!(canvas.is_drawn(0, 0));
        assert!(canvas.is_drawn(9, 9));
    }

    #[test]
    fn test_primitives_clip_at_border() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(-50, 5, 50, 5, Pen::new(RED, 1));
        canvas.fill_rect(-3, -3, 5, 5, RED);
        canvas.stroke_ellipse(0, 0, 30, 30, Pen::new(RED, 2));
        assert!(canvas.is_drawn(0, 5));
        assert!(canvas.is_drawn(9, 5));
        assert!(canvas.is_drawn(1, 1));
        assert!(canvas.pixel(10, 5).is_none());
    }

    #[test]
    fn test_fill_rect_exact_extent() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(2, 3, 2, 2, RED);
        assert_eq!(canvas.drawn_pixel_count(), 4);
        assert!(canvas.is_drawn(3, 4));
        assert!(!canvas.is_drawn(4, 4));
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_rect(5, 5, 6, 6, Pen::new(RED, 1));
        assert!(canvas.is_drawn(5, 5));
        assert!(canvas.is_drawn(11, 11));
        assert!(canvas.is_drawn(8, 5));
        assert!(!canvas.is_drawn(8, 8));
        // 4 sides of 7 pixels sharing 4 corners
        assert_eq!(canvas.drawn_pixel_count(), 24);
    }

    #[test]
    fn test_circle_ring() {
        let mut canvas = Canvas::new(40, 40);
        canvas.stroke_ellipse(20, 20, 10, 10, Pen::new(RED, 1));
        assert!(canvas.is_drawn(30, 20));
        assert!(canvas.is_drawn(10, 20));
        assert!(canvas.is_drawn(20, 30));
        assert!(canvas.is_drawn(20, 10));
        assert!(!canvas.is_drawn(20, 20));
        assert!(!canvas.is_drawn(32, 20));
    }

    #[test]
    fn test_thick_circle_covers_both_sides_of_radius() {
        let mut canvas = Canvas::new(40, 40);
        canvas.stroke_ellipse(20, 20, 10, 10, Pen::new(RED, 4));
        assert!(canvas.is_drawn(28, 20));
        assert!(canvas.is_drawn(32, 20));
        assert!(!canvas.is_drawn(27, 20));
        assert!(!canvas.is_drawn(33, 20));
    }
}
