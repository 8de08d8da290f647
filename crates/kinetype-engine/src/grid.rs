//! Glyph and sign decomposition into grid cells.
//!
//! A formation is a flat list of [`Cell`]s. Text words are built from one
//! [`Letter`] per character, laid out left to right; signs are built from
//! imported pixel-art and wrapped as a single synthetic letter.

use kinetype_core::{ManhattanSize, Rgb, SignExportFormat, SignParticle, SignSize, Vec2};
use kinetype_fonts::{GlyphMatrix, GlyphRegistry};

use crate::{EngineError, Result};

/// Extra space around a letter, in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    /// Same margin on the left and right, none above or below.
    pub const fn horizontal(value: f32) -> Self {
        Self {
            top: 0.0,
            right: value,
            bottom: 0.0,
            left: value,
        }
    }
}

/// One colored unit square of a formation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Canvas-space X of the cell.
    pub x: f32,
    /// Canvas-space Y of the cell.
    pub y: f32,
    pub size: f32,
    pub spacing: f32,
    pub row: usize,
    pub column: usize,
    pub color: Rgb,
}

impl Cell {
    fn new(row: usize, column: usize, size: f32, spacing: f32, color: Rgb) -> Self {
        let mut cell = Self {
            x: 0.0,
            y: 0.0,
            size,
            spacing,
            row,
            column,
            color,
        };
        cell.place(Vec2::ZERO);
        cell
    }

    /// Position of the cell in canvas space.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn place(&mut self, origin: Vec2) {
        let pitch = self.size + self.spacing;
        self.x = origin.x + self.column as f32 * pitch;
        self.y = origin.y + self.row as f32 * pitch;
    }
}

/// Cells decomposed from one glyph or sign, with the grid extent in cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    pub cells: Vec<Cell>,
    /// Width of the source grid, in cells.
    pub columns: usize,
    /// Height of the source grid, in cells.
    pub rows: usize,
    pub box_size: f32,
    pub box_spacing: f32,
}

/// Emit one cell per set entry of `matrix`, positioned relative to the origin.
pub fn decompose_glyph(matrix: &GlyphMatrix, box_size: f32, box_spacing: f32, color: Rgb) -> CellGrid {
    let cells = matrix
        .set_cells()
        .map(|(row, column)| Cell::new(row, column, box_size, box_spacing, color))
        .collect();

    CellGrid {
        cells,
        columns: matrix.columns(),
        rows: matrix.rows(),
        box_size,
        box_spacing,
    }
}

/// A decomposed character (or sign) with a margin and an anchor position.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    grid: CellGrid,
    margin: Margin,
    position: Vec2,
}

impl Letter {
    pub fn new(grid: CellGrid, margin: Margin) -> Self {
        Self {
            grid,
            margin,
            position: Vec2::ZERO,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.grid.cells
    }

    pub fn cell_count(&self) -> usize {
        self.grid.cells.len()
    }

    /// Grid width in cells.
    pub fn columns(&self) -> usize {
        self.grid.columns
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    /// Measured width in canvas units, margins included.
    pub fn width(&self) -> f32 {
        self.grid.columns as f32 * self.pitch() + self.margin.left + self.margin.right
    }

    /// Measured height in canvas units, margins included.
    pub fn height(&self) -> f32 {
        self.grid.rows as f32 * self.pitch() + self.margin.top + self.margin.bottom
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the letter, re-laying out every cell from its row and column.
    pub fn set_position(&mut self, origin: Vec2) {
        for cell in &mut self.grid.cells {
            cell.place(origin);
        }
        self.position = origin;
    }

    fn pitch(&self) -> f32 {
        self.grid.box_size + self.grid.box_spacing
    }
}

/// Decompose the registered glyph for `ch` into a letter.
///
/// # Errors
/// Returns [`EngineError::Font`] when `ch` has no glyph.
pub fn build_letter(ch: char, registry: &GlyphRegistry, style: &WordStyle) -> Result<Letter> {
    let matrix = registry.lookup(ch)?;
    let grid = decompose_glyph(matrix, style.box_size, style.box_spacing, style.color);
    Ok(Letter::new(grid, Margin::horizontal(style.letter_spacing)))
}

/// Sizing and color used when building words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordStyle {
    pub box_size: f32,
    pub box_spacing: f32,
    /// Left and right margin of every letter.
    pub letter_spacing: f32,
    pub color: Rgb,
    /// Spacing between cells of pixel-art signs.
    pub sign_box_spacing: f32,
}

impl Default for WordStyle {
    fn default() -> Self {
        Self {
            box_size: 12.0,
            box_spacing: 0.0,
            letter_spacing: 5.0,
            color: Rgb::BLACK,
            sign_box_spacing: 0.0,
        }
    }
}

/// What a word is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum WordSource {
    Glyph(String),
    PixelArt(SignExportFormat),
}

/// A formation: letters laid out left to right from an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    letters: Vec<Letter>,
    position: Vec2,
    total_cell_count: usize,
}

impl Word {
    pub fn new(letters: Vec<Letter>) -> Self {
        let total_cell_count = letters.iter().map(Letter::cell_count).sum();
        let mut word = Self {
            letters,
            position: Vec2::ZERO,
            total_cell_count,
        };
        word.set_position(Vec2::ZERO);
        word
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Every cell of every letter, in letter order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.letters.iter().flat_map(Letter::cells)
    }

    /// Number of particles needed to draw this word.
    pub fn total_cell_count(&self) -> usize {
        self.total_cell_count
    }

    pub fn width(&self) -> f32 {
        self.letters.iter().map(Letter::width).sum()
    }

    pub fn height(&self) -> f32 {
        self.letters.iter().map(Letter::height).fold(0.0, f32::max)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Anchor the word at `anchor`, re-laying out every letter by running width.
    pub fn set_position(&mut self, anchor: Vec2) {
        let mut x = anchor.x;
        for letter in &mut self.letters {
            letter.set_position(Vec2::new(x, anchor.y));
            x += letter.width();
        }
        self.position = anchor;
    }

    /// Export the word as a pixel-art sign.
    ///
    /// Grid coordinates are taken from each cell's offset to the word anchor,
    /// with the row/column axes swapped the way the sign format expects.
    pub fn export_sign(&self) -> SignExportFormat {
        let particle_size = self.cells().next().map_or(0.0, |c| c.size);
        let particles: Vec<SignParticle> = self
            .cells()
            .map(|cell| {
                let pitch = cell.size + cell.spacing;
                let (grid_x, grid_y) = if pitch > 0.0 {
                    (
                        ((cell.x - self.position.x) / pitch).round() as i32,
                        ((cell.y - self.position.y) / pitch).round() as i32,
                    )
                } else {
                    (cell.column as i32, cell.row as i32)
                };
                SignParticle {
                    row: grid_x,
                    column: grid_y,
                    color: cell.color,
                    size: cell.size,
                }
            })
            .collect();

        let columns = particles.iter().map(|p| p.row + 1).max().unwrap_or(0).max(0) as u32;
        let rows = particles.iter().map(|p| p.column + 1).max().unwrap_or(0).max(0) as u32;

        SignExportFormat {
            size: SignSize {
                width: self.width(),
                height: self.height(),
            },
            particle_size,
            manhattan_size: ManhattanSize { rows, columns },
            particles,
        }
    }
}

/// Build a formation from text or pixel-art.
///
/// Text is upper-cased and every character must have a glyph.
///
/// # Errors
/// [`EngineError::Font`] for unknown characters, [`EngineError::MalformedSignData`]
/// for unusable signs.
pub fn build_word(source: &WordSource, registry: &GlyphRegistry, style: &WordStyle) -> Result<Word> {
    match source {
        WordSource::Glyph(text) => {
            let letters = text
                .to_uppercase()
                .chars()
                .map(|ch| build_letter(ch, registry, style))
                .collect::<Result<Vec<_>>>()?;
            Ok(Word::new(letters))
        }
        WordSource::PixelArt(sign) => build_sign_word(&sign.particles, style.sign_box_spacing),
    }
}

/// Build a one-letter word from imported sign pixels.
///
/// The sign's bounding box is normalised to start at zero, and the row and
/// column axes are swapped: sign pixels are authored column-major while glyph
/// cells are row-major. The box size comes from the last pixel.
///
/// # Errors
/// [`EngineError::MalformedSignData`] when there are no pixels, when a size is
/// not a positive number, or when pixel sizes disagree.
pub fn build_sign_word(particles: &[SignParticle], box_spacing: f32) -> Result<Word> {
    let Some(last) = particles.last() else {
        return Err(EngineError::MalformedSignData("sign has no particles".to_string()));
    };
    let box_size = last.size;
    if !(box_size.is_finite() && box_size > 0.0) {
        return Err(EngineError::MalformedSignData(format!(
            "particle size must be positive, got {box_size}"
        )));
    }

    let (min_row, max_row, min_col, max_col) = particles.iter().try_fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_row, max_row, min_col, max_col), p| {
            if p.size != box_size {
                return Err(EngineError::MalformedSignData(format!(
                    "inconsistent particle sizes: {} and {box_size}",
                    p.size
                )));
            }
            Ok((
                min_row.min(p.row),
                max_row.max(p.row),
                min_col.min(p.column),
                max_col.max(p.column),
            ))
        },
    )?;

    let cells = particles
        .iter()
        .map(|p| {
            let row = (i64::from(p.column) - i64::from(min_col)) as usize;
            let column = (i64::from(p.row) - i64::from(min_row)) as usize;
            Cell::new(row, column, box_size, box_spacing, p.color)
        })
        .collect();

    let grid = CellGrid {
        cells,
        columns: (i64::from(max_row) - i64::from(min_row) + 1) as usize,
        rows: (i64::from(max_col) - i64::from(min_col) + 1) as usize,
        box_size,
        box_spacing,
    };

    Ok(Word::new(vec![Letter::new(grid, Margin::default())]))
}
