//! Reticle shape catalog
//!
//! Each shape is drawn around a center point and parameterized by the
//! reticle size (half-extent in pixels) and the pen. The catalog is closed:
//! adding a shape means adding a variant, and the compiler points at every
//! match that needs to learn about it.

use crate::canvas::{Canvas, Pen};

/// Gap from the center at which the arms of a gapped cross stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    /// Stops one pen width from the center
    Pen,
    /// Stops at `size / 2`
    Large,
    /// Stops at three quarters of `size / 2`
    Medium,
    /// Stops at half of `size / 2`
    Small,
}

impl Gap {
    fn distance(self, size: i32, pen_width: i32) -> i32 {
        let side = size / 2;
        match self {
            Gap::Pen => pen_width,
            Gap::Large => side,
            Gap::Medium => side * 3 / 4,
            Gap::Small => side / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Cross,
    CrossPenGap,
    CrossLargeGap,
    CrossMediumGap,
    CrossSmallGap,
    CrossLargeGapDot,
    CrossMediumGapDot,
    CrossSmallGapDot,
    CircleDot,
    CircleSmallCross,
    Dot,
    CrossCircle,
    CrossHalfCircle,
    CrossSquare,
    CircleDropLine,
}

impl Shape {
    /// All shapes in cycling order; a shape's position is its persisted index
    pub const ALL: [Shape; 15] = [
        Shape::Cross,
        Shape::CrossPenGap,
        Shape::CrossLargeGap,
        Shape::CrossMediumGap,
        Shape::CrossSmallGap,
        Shape::CrossLargeGapDot,
        Shape::CrossMediumGapDot,
        Shape::CrossSmallGapDot,
        Shape::CircleDot,
        Shape::CircleSmallCross,
        Shape::Dot,
        Shape::CrossCircle,
        Shape::CrossHalfCircle,
        Shape::CrossSquare,
        Shape::CircleDropLine,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Shape> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        // ALL lists the variants in declaration order
        self as usize
    }

    pub fn next(self) -> Shape {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn prev(self) -> Shape {
        Self::ALL[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Cross => "cross",
            Shape::CrossPenGap => "cross with pen gap",
            Shape::CrossLargeGap => "cross with large gap",
            Shape::CrossMediumGap => "cross with medium gap",
            Shape::CrossSmallGap => "cross with small gap",
            Shape::CrossLargeGapDot => "cross with large gap and dot",
            Shape::CrossMediumGapDot => "cross with medium gap and dot",
            Shape::CrossSmallGapDot => "cross with small gap and dot",
            Shape::CircleDot => "circle with dot",
            Shape::CircleSmallCross => "circle with small cross",
            Shape::Dot => "dot",
            Shape::CrossCircle => "cross with circle",
            Shape::CrossHalfCircle => "cross with half-size circle",
            Shape::CrossSquare => "cross with square",
            Shape::CircleDropLine => "circle with drop line",
        }
    }

    /// Draw this shape centered on `center`
    pub fn draw(self, canvas: &mut Canvas, center: (i32, i32), size: i32, pen: Pen) {
        match self {
            Shape::Cross => full_cross(canvas, center, size, pen),
            Shape::CrossPenGap => gapped_cross(canvas, center, size, pen, Gap::Pen),
            Shape::CrossLargeGap => gapped_cross(canvas, center, size, pen, Gap::Large),
            Shape::CrossMediumGap => gapped_cross(canvas, center, size, pen, Gap::Medium),
            Shape::CrossSmallGap => gapped_cross(canvas, center, size, pen, Gap::Small),
            Shape::CrossLargeGapDot => {
                gapped_cross(canvas, center, size, pen, Gap::Large);
                center_dot(canvas, center, pen);
            }
            Shape::CrossMediumGapDot => {
                gapped_cross(canvas, center, size, pen, Gap::Medium);
                center_dot(canvas, center, pen);
            }
            Shape::CrossSmallGapDot => {
                gapped_cross(canvas, center, size, pen, Gap::Small);
                center_dot(canvas, center, pen);
            }
            Shape::CircleDot => {
                circle(canvas, center, size, pen);
                center_dot(canvas, center, pen);
            }
            Shape::CircleSmallCross => {
                full_cross(canvas, center, size / 4, pen);
                circle(canvas, center, size, pen);
            }
            Shape::Dot => center_dot(canvas, center, pen),
            Shape::CrossCircle => {
                full_cross(canvas, center, size, pen);
                circle(canvas, center, size, pen);
            }
            Shape::CrossHalfCircle => {
                full_cross(canvas, center, size, pen);
                circle(canvas, center, size / 2, pen);
            }
            Shape::CrossSquare => {
                full_cross(canvas, center, size, pen);
                let half = size / 2;
                canvas.stroke_rect(center.0 - half, center.1 - half, size, size, pen);
            }
            Shape::CircleDropLine => {
                let (cx, cy) = center;
                canvas.draw_line(cx, cy, cx, cy + size, pen);
                circle(canvas, center, size, pen);
            }
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn full_cross(canvas: &mut Canvas, (cx, cy): (i32, i32), arm: i32, pen: Pen) {
    canvas.draw_line(cx - arm, cy, cx + arm, cy, pen);
    canvas.draw_line(cx, cy - arm, cx, cy + arm, pen);
}

fn gapped_cross(canvas: &mut Canvas, (cx, cy): (i32, i32), size: i32, pen: Pen, gap: Gap) {
    let gap = gap.distance(size, pen.width);
    canvas.draw_line(cx - size, cy, cx - gap, cy, pen);
    canvas.draw_line(cx + gap, cy, cx + size, cy, pen);
    canvas.draw_line(cx, cy - size, cx, cy - gap, pen);
    canvas.draw_line(cx, cy + gap, cx, cy + size, pen);
}

fn center_dot(canvas: &mut Canvas, (cx, cy): (i32, i32), pen: Pen) {
    let offset = pen.width / 2;
    canvas.fill_rect(cx - offset, cy - offset, pen.width, pen.width, pen.color);
}

fn circle(canvas: &mut Canvas, (cx, cy): (i32, i32), radius: i32, pen: Pen) {
    canvas.stroke_ellipse(cx, cy, radius, radius, pen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const CENTER: (i32, i32) = (50, 50);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn render(shape: Shape, size: i32, pen_width: i32) -> Canvas {
        let mut canvas = Canvas::new(100, 100);
        shape.draw(&mut canvas, CENTER, size, Pen::new(GREEN, pen_width));
        canvas
    }

    #[test]
    fn test_index_round_trip_and_count() {
        assert_eq!(Shape::COUNT, 15);
        for (i, shape) in Shape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
            assert_eq!(Shape::from_index(i), Some(*shape));
        }
        assert_eq!(Shape::from_index(15), None);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Shape::CircleDropLine.next(), Shape::Cross);
        assert_eq!(Shape::Cross.prev(), Shape::CircleDropLine);
        assert_eq!(Shape::Cross.next(), Shape::CrossPenGap);
    }

    #[test]
    fn test_every_shape_draws_something() {
        for shape in Shape::ALL {
            let canvas = render(shape, 16, 1);
            assert!(canvas.drawn_pixel_count() > 0, "{} drew nothing", shape);
        }
    }

    #[test]
    fn test_full_cross_extent() {
        let canvas = render(Shape::Cross, 16, 1);
        assert!(canvas.is_drawn(50, 50));
        assert!(canvas.is_drawn(34, 50));
        assert!(canvas.is_drawn(66, 50));
        assert!(canvas.is_drawn(50, 34));
        assert!(canvas.is_drawn(50, 66));
        assert!(!canvas.is_drawn(67, 50));
        assert!(!canvas.is_drawn(51, 51));
        // two arms of 33 pixels sharing the center
        assert_eq!(canvas.drawn_pixel_count(), 65);
    }

    #[test]
    fn test_pen_gap_leaves_center_clear() {
        let canvas = render(Shape::CrossPenGap, 16, 2);
        assert!(!canvas.is_drawn(50, 50));
        assert!(!canvas.is_drawn(51, 49));
        assert!(canvas.is_drawn(52, 50));
        assert!(canvas.is_drawn(48, 50));
    }

    #[test]
    fn test_gap_distances() {
        // size 16 -> side 8: large gap 8, medium 6, small 4
        let large = render(Shape::CrossLargeGap, 16, 1);
        assert!(!large.is_drawn(57, 50));
        assert!(large.is_drawn(58, 50));

        let medium = render(Shape::CrossMediumGap, 16, 1);
        assert!(!medium.is_drawn(55, 50));
        assert!(medium.is_drawn(56, 50));

        let small = render(Shape::CrossSmallGap, 16, 1);
        assert!(!small.is_drawn(53, 50));
        assert!(small.is_drawn(54, 50));
        assert!(small.is_drawn(50, 46));
    }

    #[test]
    fn test_gap_variants_with_dot() {
        for shape in [
            Shape::CrossLargeGapDot,
            Shape::CrossMediumGapDot,
            Shape::CrossSmallGapDot,
        ] {
            let canvas = render(shape, 16, 2);
            assert!(canvas.is_drawn(50, 50), "{} missing dot", shape);
            assert!(canvas.is_drawn(49, 49), "{} dot too small", shape);
            assert!(!canvas.is_drawn(51, 51), "{} dot too large", shape);
        }
    }

    #[test]
    fn test_dot_only() {
        let canvas = render(Shape::Dot, 16, 3);
        assert_eq!(canvas.drawn_pixel_count(), 9);
        assert!(canvas.is_drawn(49, 49));
        assert!(canvas.is_drawn(51, 51));
    }

    #[test]
    fn test_circle_radius_follows_size() {
        let canvas = render(Shape::CircleDot, 20, 1);
        assert!(canvas.is_drawn(70, 50));
        assert!(canvas.is_drawn(50, 30));
        assert!(canvas.is_drawn(50, 50));
        assert!(!canvas.is_drawn(60, 50));

        let half = render(Shape::CrossHalfCircle, 20, 1);
        assert!(half.is_drawn(50, 40));
        assert!(!half.is_drawn(60, 60));
        assert!(half.is_drawn(57, 57));
    }

    #[test]
    fn test_circle_small_cross_arms() {
        let canvas = render(Shape::CircleSmallCross, 20, 1);
        assert!(canvas.is_drawn(55, 50));
        assert!(!canvas.is_drawn(56, 50));
        assert!(canvas.is_drawn(70, 50));
    }

    #[test]
    fn test_cross_square_corners() {
        let canvas = render(Shape::CrossSquare, 16, 1);
        assert!(canvas.is_drawn(42, 42));
        assert!(canvas.is_drawn(58, 58));
        assert!(canvas.is_drawn(66, 50));
        assert!(!canvas.is_drawn(45, 45));
    }

    #[test]
    fn test_drop_line_points_down_only() {
        let canvas = render(Shape::CircleDropLine, 16, 1);
        assert!(canvas.is_drawn(50, 58));
        assert!(!canvas.is_drawn(50, 42));
        assert!(canvas.is_drawn(50, 34));
    }

    #[test]
    fn test_shape_drawn_near_border_does_not_panic() {
        for shape in Shape::ALL {
            let mut canvas = Canvas::new(10, 10);
            shape.draw(&mut canvas, (0, 9), 100, Pen::new(GREEN, 4));
        }
    }
}
