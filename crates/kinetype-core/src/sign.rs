//! Pixel-art sign exchange format.
//!
//! Signs are authored in an external pixel editor and exchanged as JSON with
//! camelCase field names. Only `particles` takes part in building a formation;
//! the remaining fields describe the editor grid the sign was drawn on.

use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Pixel size of the editor surface a sign was drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignSize {
    pub width: f32,
    pub height: f32,
}

/// Number of grid rows and columns of the editor surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManhattanSize {
    pub rows: u32,
    pub columns: u32,
}

/// One painted pixel of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignParticle {
    pub row: i32,
    pub column: i32,
    pub color: Rgb,
    pub size: f32,
}

/// A complete exported sign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignExportFormat {
    pub size: SignSize,
    pub particle_size: f32,
    pub manhattan_size: ManhattanSize,
    pub particles: Vec<SignParticle>,
}
