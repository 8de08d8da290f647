//! Core types shared by the kinetype crates.
//!
//! Holds the packed color type, the canvas/render coordinate frames used by
//! the particle integrator and the sign exchange format produced by pixel-art
//! tooling.

mod color;
mod sign;
mod space;

pub use color::{Rgb, hsl_to_rgb, speed_to_color};
pub use glam::Vec2;
pub use sign::{ManhattanSize, SignExportFormat, SignParticle, SignSize};
pub use space::Canvas;
