//! Bitmap glyphs for kinetype formations.
//!
//! A glyph is a boolean matrix; every set cell becomes one particle target.
//! Glyphs are kept in a [`GlyphRegistry`] which is handed to the formation
//! builders explicitly. [`GlyphRegistry::default_font`] provides block
//! capitals, digits and common punctuation.

mod default_font;

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

pub use default_font::DEFAULT_FONT;

/// Errors raised while defining or looking up glyphs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FontError {
    #[error("Unknown glyph: {0:?}")]
    UnknownGlyph(char),

    #[error("Malformed glyph {0:?}: {1}")]
    MalformedGlyph(char, String),
}

/// Result type alias for glyph operations.
pub type Result<T> = std::result::Result<T, FontError>;

/// A rows × columns boolean grid for one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl GlyphMatrix {
    /// Build a matrix from row vectors. Ragged rows are padded with unset cells.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            cells.extend(row.iter().copied());
            cells.extend(std::iter::repeat_n(false, columns - row.len()));
        }
        Self {
            rows: rows.len(),
            columns,
            cells,
        }
    }

    /// Parse text art: any character other than a space sets the cell.
    ///
    /// # Errors
    /// Returns [`FontError::MalformedGlyph`] when `art` has no rows.
    pub fn from_art<S: AsRef<str>>(ch: char, art: &[S]) -> Result<Self> {
        if art.is_empty() {
            return Err(FontError::MalformedGlyph(ch, "no rows".to_string()));
        }
        let rows: Vec<Vec<bool>> = art
            .iter()
            .map(|line| line.as_ref().chars().map(|c| c != ' ').collect())
            .collect();
        Ok(Self::from_rows(&rows))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the cell at `(row, column)` is set. Out of range reads are unset.
    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.cells[row * self.columns + column]
    }

    /// Iterate `(row, column)` of every set cell in row-major order.
    pub fn set_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(i, _)| (i / self.columns, i % self.columns))
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

/// A glyph definition as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterArt {
    pub char: char,
    pub art: Vec<String>,
}

/// Named glyph matrices, one per character.
#[derive(Debug, Clone, Default)]
pub struct GlyphRegistry {
    glyphs: HashMap<char, GlyphMatrix>,
}

impl GlyphRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in block font.
    pub fn default_font() -> Self {
        let mut registry = Self::new();
        for (ch, art) in DEFAULT_FONT {
            // Built-in art always has rows
            if let Ok(matrix) = GlyphMatrix::from_art(*ch, art) {
                registry.register(*ch, matrix);
            }
        }
        registry
    }

    /// Store a glyph, replacing any previous one for `ch`.
    pub fn register(&mut self, ch: char, matrix: GlyphMatrix) {
        self.glyphs.insert(ch, matrix);
    }

    /// Parse and register a batch of art definitions.
    ///
    /// # Errors
    /// Fails on the first malformed definition; earlier ones stay registered.
    pub fn register_all<'a>(&mut self, chars: impl IntoIterator<Item = &'a CharacterArt>) -> Result<()> {
        for def in chars {
            let matrix = GlyphMatrix::from_art(def.char, &def.art)?;
            self.register(def.char, matrix);
        }
        Ok(())
    }

    /// Remove a glyph. Returns whether one was registered.
    pub fn unregister(&mut self, ch: char) -> bool {
        self.glyphs.remove(&ch).is_some()
    }

    /// Look up the glyph for `ch`.
    ///
    /// # Errors
    /// Returns [`FontError::UnknownGlyph`] when nothing is registered for `ch`.
    pub fn lookup(&self, ch: char) -> Result<&GlyphMatrix> {
        self.glyphs.get(&ch).ok_or(FontError::UnknownGlyph(ch))
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Remove every glyph.
    pub fn clear(&mut self) {
        self.glyphs.clear();
    }
}
