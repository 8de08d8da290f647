//! Drawing the particle pool with a ratatui canvas.

use std::collections::HashMap;

use kinetype_core::{Canvas, speed_to_color};
use kinetype_engine::{MAX_SPEED, World, WorldObject};
use ratatui::{
    Frame,
    layout::{Rect, Size},
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas as CanvasWidget, Points},
};

/// Canvas size for a terminal area, given the canvas units covered by one
/// half-block pixel. Each terminal cell holds two pixels stacked vertically.
pub fn canvas_for(size: Size, unit: f32) -> Canvas {
    Canvas::new(
        f32::from(size.width) * unit,
        f32::from(size.height) * 2.0 * unit,
    )
}

/// Color a particle is drawn with: its formation color, or one derived from
/// its speed while it belongs to no formation.
pub fn particle_color(object: &WorldObject) -> Color {
    match object.color {
        Some(rgb) => rgb.into(),
        None => speed_to_color(object.particle.velocity.length() / MAX_SPEED),
    }
}

/// Render-space pixel centers covering a particle's square, which extends
/// right and down from its position.
pub fn square_points(object: &WorldObject, unit: f32) -> impl Iterator<Item = (f64, f64)> {
    let steps = (object.size / unit).round().max(1.0) as u32;
    let origin = object.particle.position;
    let half = f64::from(unit) / 2.0;
    (0..steps).flat_map(move |i| {
        (0..steps).map(move |j| {
            (
                f64::from(origin.x + i as f32 * unit) + half,
                f64::from(origin.y - j as f32 * unit) - half,
            )
        })
    })
}

/// Draw every particle of `world` into `area`.
pub fn draw_world(frame: &mut Frame, area: Rect, world: &World, unit: f32, background: Color) {
    let mut by_color: HashMap<Color, Vec<(f64, f64)>> = HashMap::new();
    for object in world.objects() {
        by_color
            .entry(particle_color(object))
            .or_default()
            .extend(square_points(object, unit));
    }

    let canvas = world.canvas();
    let (half_w, half_h) = (f64::from(canvas.width) / 2.0, f64::from(canvas.height) / 2.0);
    let widget = CanvasWidget::default()
        .marker(Marker::HalfBlock)
        .background_color(background)
        .x_bounds([-half_w, half_w])
        .y_bounds([-half_h, half_h])
        .paint(move |ctx| {
            for (color, coords) in &by_color {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use kinetype_core::{Rgb, Vec2};
    use kinetype_engine::Particle;

    use super::*;

    fn object(position: Vec2, size: f32, color: Option<Rgb>) -> WorldObject {
        WorldObject {
            particle: Particle::new(position),
            color,
            size,
        }
    }

    #[test]
    fn test_canvas_for_area() {
        let canvas = canvas_for(Size::new(80, 24), 6.0);
        assert_eq!(canvas, Canvas::new(480.0, 288.0));
    }

    #[test]
    fn test_formation_color_wins() {
        let o = object(Vec2::ZERO, 12.0, Some(Rgb(0x336699)));
        assert_eq!(particle_color(&o), Color::Rgb(0x33, 0x66, 0x99));
    }

    #[test]
    fn test_free_particles_colored_by_speed() {
        let mut slow = object(Vec2::ZERO, 12.0, None);
        let mut fast = slow.clone();
        slow.particle.velocity = Vec2::ZERO;
        fast.particle.velocity = Vec2::new(MAX_SPEED, 0.0);
        assert_eq!(particle_color(&slow), speed_to_color(0.0));
        assert_eq!(particle_color(&fast), speed_to_color(1.0));
    }

    #[test]
    fn test_square_points_cover_size() {
        let o = object(Vec2::new(10.0, 20.0), 12.0, None);
        let points: Vec<(f64, f64)> = square_points(&o, 6.0).collect();
        assert_eq!(points, vec![(13.0, 17.0), (13.0, 11.0), (19.0, 17.0), (19.0, 11.0)]);

        // Smaller than a pixel still draws one
        let tiny = object(Vec2::ZERO, 1.0, None);
        assert_eq!(square_points(&tiny, 6.0).count(), 1);
    }
}
