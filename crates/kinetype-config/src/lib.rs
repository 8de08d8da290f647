//! Configuration file for kinetype.
//!
//! The file is TOML. Every field is optional; the defaults show a short demo.
//!
//! ```toml
//! particle_size = 12
//! letter_spacing = 5
//! color = 0xFFFFFF
//! loop = true
//! surplus = "cyclic"
//!
//! [[sections]]
//! kind = "words"
//! text = ["Hello", "World"]
//!
//! [[sections]]
//! kind = "sign"
//! signs = ["heart.json"]
//! ```
//!
//! Sign paths are relative to the directory of the config file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use kinetype_core::{Rgb, SignExportFormat, Vec2};
use kinetype_engine::{FormationOptions, SectionKind, SurplusAssignment, WordSource, WordStyle};
use kinetype_fonts::{CharacterArt, FontError, GlyphRegistry};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid sign file {}: {source}", path.display())]
    Sign {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Mirrors [`SurplusAssignment`] for the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surplus {
    #[default]
    Random,
    Cyclic,
}

impl From<Surplus> for SurplusAssignment {
    fn from(value: Surplus) -> Self {
        match value {
            Surplus::Random => SurplusAssignment::Random,
            Surplus::Cyclic => SurplusAssignment::Cyclic,
        }
    }
}

/// Mirrors [`SectionKind`] for the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Words,
    Tags,
    Sign,
}

impl From<SectionType> for SectionKind {
    fn from(value: SectionType) -> Self {
        match value {
            SectionType::Words => SectionKind::Words,
            SectionType::Tags => SectionKind::Tags,
            SectionType::Sign => SectionKind::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

/// One `[[sections]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub kind: SectionType,
    /// Words, for `words` and `tags` sections.
    #[serde(default)]
    pub text: Vec<String>,
    /// Sign JSON files, for `sign` sections.
    #[serde(default)]
    pub signs: Vec<PathBuf>,
}

impl SectionConfig {
    fn text(kind: SectionType, text: &[&str]) -> Self {
        Self {
            kind,
            text: text.iter().map(|t| (*t).to_string()).collect(),
            signs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Edge length of a particle and of a glyph cell.
    pub particle_size: f32,
    /// Gap between letters.
    pub letter_spacing: f32,
    /// Gap between the cells of a glyph.
    pub box_spacing: f32,
    /// Text color, as `0xRRGGBB`.
    pub color: Rgb,
    pub background: Rgb,
    pub fps: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Where new particles appear, relative to the screen center.
    pub origin: Origin,
    pub surplus: Surplus,
    /// Fixed random seed, for reproducible runs.
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    /// Extra or replacement glyphs.
    pub glyphs: Vec<CharacterArt>,
    pub sections: Vec<SectionConfig>,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_size: 12.0,
            letter_spacing: 5.0,
            box_spacing: 0.0,
            color: Rgb::WHITE,
            background: Rgb::BLACK,
            fps: 60.0,
            looping: false,
            origin: Origin::default(),
            surplus: Surplus::default(),
            seed: None,
            log_file: None,
            glyphs: Vec::new(),
            sections: vec![
                SectionConfig::text(SectionType::Words, &["Hi", "This is", "kinetype"]),
                SectionConfig::text(SectionType::Tags, &["Rust", "Particles", "Terminal"]),
            ],
            base_dir: None,
        }
    }
}

impl Config {
    /// `config.toml` in the platform config directory, if there is a home directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "am2rican5", "kinetype")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load `path`, or the default location when `path` is `None`.
    ///
    /// A missing file at the default location gives the defaults; a missing
    /// explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(self.fps.is_finite() && self.fps > 0.0) {
            return invalid("fps", "must be a positive number");
        }
        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return invalid("particle_size", "must be a positive number");
        }
        for (field, value) in [
            ("letter_spacing", self.letter_spacing),
            ("box_spacing", self.box_spacing),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must not be negative");
            }
        }

        for section in &self.sections {
            match section.kind {
                SectionType::Words | SectionType::Tags => {
                    if section.text.is_empty() {
                        return invalid("sections", "text sections need at least one entry in `text`");
                    }
                    if !section.signs.is_empty() {
                        return invalid("sections", "`signs` is only allowed in sign sections");
                    }
                }
                SectionType::Sign => {
                    if section.signs.is_empty() {
                        return invalid("sections", "sign sections need at least one entry in `signs`");
                    }
                }
            }
        }
        Ok(())
    }

    pub fn word_style(&self) -> WordStyle {
        WordStyle {
            box_size: self.particle_size,
            box_spacing: self.box_spacing,
            letter_spacing: self.letter_spacing,
            color: self.color,
            ..WordStyle::default()
        }
    }

    pub fn formation_options(&self) -> FormationOptions {
        FormationOptions {
            origin: Vec2::new(self.origin.x, self.origin.y),
            particle_size: self.particle_size,
            surplus: self.surplus.into(),
        }
    }

    /// The built-in font with the configured glyphs on top.
    pub fn registry(&self) -> Result<GlyphRegistry> {
        let mut registry = GlyphRegistry::default_font();
        registry.register_all(&self.glyphs)?;
        Ok(registry)
    }

    /// Every section with its words ready to build. Sign files are read here.
    pub fn section_sources(&self) -> Result<Vec<(SectionKind, Vec<WordSource>)>> {
        self.sections
            .iter()
            .map(|section| {
                let sources = match section.kind {
                    SectionType::Words | SectionType::Tags => section
                        .text
                        .iter()
                        .map(|t| WordSource::Glyph(t.clone()))
                        .collect(),
                    SectionType::Sign => section
                        .signs
                        .iter()
                        .map(|path| load_sign(&self.resolve(path)).map(WordSource::PixelArt))
                        .collect::<Result<Vec<_>>>()?,
                };
                Ok((section.kind.into(), sources))
            })
            .collect()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Read a sign exported as JSON.
pub fn load_sign(path: &Path) -> Result<SignExportFormat> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Sign {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kinetype-config-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const SIGN_JSON: &str = r#"{
        "size": {"width": 100, "height": 100},
        "particleSize": 10,
        "manhattanSize": {"columns": 10, "rows": 10},
        "particles": [
            {"row": 4, "column": 4, "color": 16711680, "size": 10},
            {"row": 5, "column": 4, "color": 16711680, "size": 10}
        ]
    }"#;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.particle_size, 12.0);
        assert_eq!(config.letter_spacing, 5.0);
        assert_eq!(config.fps, 60.0);
        assert!(!config.looping);
        assert_eq!(config.sections.len(), 2);
        assert!(config.validate().is_ok());
        assert_eq!(Config::from_toml("").unwrap(), config);
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::from_toml(
            r#"
            particle_size = 8
            letter_spacing = 2.5
            box_spacing = 1
            color = 0xFF8800
            background = 0x101010
            fps = 30
            loop = true
            origin = { x = -10, y = 4 }
            surplus = "cyclic"
            seed = 42
            log_file = "/tmp/kinetype.log"

            [[glyphs]]
            char = "*"
            art = ["█ █", " █ ", "█ █"]

            [[sections]]
            kind = "tags"
            text = ["one", "two"]
            "#,
        )
        .unwrap();

        assert_eq!(config.color, Rgb(0xFF8800));
        assert!(config.looping);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].kind, SectionType::Tags);

        let style = config.word_style();
        assert_eq!(style.box_size, 8.0);
        assert_eq!(style.box_spacing, 1.0);
        assert_eq!(style.letter_spacing, 2.5);
        assert_eq!(style.color, Rgb(0xFF8800));

        let options = config.formation_options();
        assert_eq!(options.origin, Vec2::new(-10.0, 4.0));
        assert_eq!(options.surplus, SurplusAssignment::Cyclic);

        let registry = config.registry().unwrap();
        assert_eq!(registry.lookup('*').unwrap().count(), 5);
        assert!(registry.contains('A'));
    }

    #[test]
    fn test_rejects_unknown_fields_and_values() {
        assert!(matches!(Config::from_toml("colour = 1"), Err(ConfigError::Toml(_))));
        assert!(matches!(
            Config::from_toml(r#"surplus = "nearest""#),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml("fps = 0"),
            Err(ConfigError::Invalid { field: "fps", .. })
        ));
        assert!(matches!(
            Config::from_toml("letter_spacing = -1"),
            Err(ConfigError::Invalid { field: "letter_spacing", .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_sections() {
        let empty = "[[sections]]\nkind = \"words\"\n";
        assert!(matches!(
            Config::from_toml(empty),
            Err(ConfigError::Invalid { field: "sections", .. })
        ));
        let no_signs = "[[sections]]\nkind = \"sign\"\ntext = [\"A\"]\n";
        assert!(matches!(
            Config::from_toml(no_signs),
            Err(ConfigError::Invalid { field: "sections", .. })
        ));
    }

    #[test]
    fn test_bad_glyph_art() {
        let config = Config::from_toml("[[glyphs]]\nchar = \"*\"\nart = []\n").unwrap();
        assert!(matches!(config.registry(), Err(ConfigError::Font(_))));
    }

    #[test]
    fn test_sign_paths_relative_to_config() {
        let dir = scratch_dir("relative");
        fs::write(dir.join("heart.json"), SIGN_JSON).unwrap();
        let config_path = dir.join("config.toml");
        fs::write(
            &config_path,
            "[[sections]]\nkind = \"sign\"\nsigns = [\"heart.json\"]\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        let sections = config.section_sources().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, SectionKind::Sign);
        match &sections[0].1[..] {
            [WordSource::PixelArt(sign)] => {
                assert_eq!(sign.particles.len(), 2);
                assert_eq!(sign.particles[0].color, Rgb(0xFF0000));
            }
            other => panic!("unexpected sources {other:?}"),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_and_broken_files() {
        let dir = scratch_dir("broken");
        assert!(matches!(
            Config::load(Some(&dir.join("nope.toml"))),
            Err(ConfigError::Io { .. })
        ));

        fs::write(dir.join("bad.json"), "{ not json").unwrap();
        assert!(matches!(load_sign(&dir.join("bad.json")), Err(ConfigError::Sign { .. })));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_text_sections_become_glyph_sources() {
        let sections = Config::default().section_sources().unwrap();
        assert_eq!(sections[0].0, SectionKind::Words);
        assert_eq!(sections[0].1[0], WordSource::Glyph("Hi".to_string()));
        assert_eq!(sections[1].0, SectionKind::Tags);
    }
}
