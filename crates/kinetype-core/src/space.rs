//! Canvas and render coordinate frames.
//!
//! Formation cells live in canvas space: origin at the top-left corner, Y
//! growing downwards. Particles live in render space: origin at the canvas
//! center, Y growing upwards.

use glam::Vec2;

/// Size of the drawing surface, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the canvas in canvas space.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Canvas-space point to render space. X is rounded to a whole unit.
    pub fn to_render(&self, v: Vec2) -> Vec2 {
        Vec2::new(round_half_up(-self.width / 2.0 + v.x), self.height / 2.0 - v.y)
    }

    /// Render-space point to canvas space.
    pub fn to_canvas(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x + self.width / 2.0, self.height / 2.0 - v.y)
    }
}

// Halves round towards positive infinity, so -0.5 becomes 0 rather than -1.
fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_origin() {
        let canvas = Canvas::new(800.0, 600.0);
        assert_eq!(canvas.to_render(canvas.center()), Vec2::ZERO);
        assert_eq!(canvas.to_canvas(Vec2::ZERO), canvas.center());
    }

    #[test]
    fn test_y_axis_inverted() {
        let canvas = Canvas::new(100.0, 100.0);
        // Top-left corner of the canvas is up and to the left in render space
        assert_eq!(canvas.to_render(Vec2::ZERO), Vec2::new(-50.0, 50.0));
        assert_eq!(canvas.to_canvas(Vec2::new(-50.0, 50.0)), Vec2::ZERO);
    }

    #[test]
    fn test_round_trip_whole_units() {
        let canvas = Canvas::new(640.0, 480.0);
        let p = Vec2::new(123.0, 45.5);
        assert_eq!(canvas.to_canvas(canvas.to_render(p)), p);
    }

    #[test]
    fn test_render_x_rounds_half_up() {
        let canvas = Canvas::new(101.0, 100.0);
        // -50.5 + 0 rounds to -50, -50.5 + 0.25 rounds to -50
        assert_eq!(canvas.to_render(Vec2::ZERO).x, -50.0);
        assert_eq!(canvas.to_render(Vec2::new(0.25, 0.0)).x, -50.0);
        assert_eq!(canvas.to_render(Vec2::new(1.0, 0.0)).x, -49.0);
    }
}
