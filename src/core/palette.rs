use super::color::{Color, ColorParseError};
use super::generator::Generator;
use super::sequence::optimize_swatches;
use crate::util::ScopedTimer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub const DEFAULT_PALETTE_SIZE: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    InvalidColor {
        index: usize,
        source: ColorParseError,
    },
    Duplicate {
        color: Color,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::InvalidColor { index, source } => {
                write!(f, "palette entry {}: {}", index, source)
            }
            PaletteError::Duplicate {
                color,
                first,
                second,
            } => write!(
                f,
                "palette color {} appears at both {} and {}",
                color, first, second
            ),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::InvalidColor { source, .. } => Some(source),
            PaletteError::Duplicate { .. } => None,
        }
    }
}

/// On-disk form of a palette.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PaletteFile {
    colors: Vec<String>,
    #[serde(default)]
    total_count: usize,
    #[serde(default)]
    generated_at: Option<String>,
}

/// An ordered list of unique colors. Built once from the generator and
/// treated as read-only afterwards; the order is display order, not
/// assignment priority.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    generated_at: Option<String>,
}

// `generated_at` is metadata and does not take part in equality.
impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for Palette {}

impl Default for Palette {
    fn default() -> Self {
        Self::build(DEFAULT_PALETTE_SIZE)
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        let mut seen: Vec<(Color, usize)> = Vec::with_capacity(colors.len());
        for (idx, color) in colors.iter().enumerate() {
            if let Some((_, first)) = seen.iter().find(|(c, _)| c == color) {
                return Err(PaletteError::Duplicate {
                    color: *color,
                    first: *first,
                    second: idx,
                });
            }
            seen.push((*color, idx));
        }
        Ok(Self {
            colors,
            generated_at: None,
        })
    }

    pub fn from_hex_strings<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Color::from_hex(s.as_ref())
                    .map_err(|source| PaletteError::InvalidColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Generate `count` candidates with the default levels and order them
    /// for maximum contrast between neighbours.
    pub fn build(count: usize) -> Self {
        Self::build_with(&Generator::default(), count)
    }

    pub fn build_with(generator: &Generator, count: usize) -> Self {
        let _timer = ScopedTimer::new("palette build");
        let swatches = optimize_swatches(generator.generate(count));
        let mut seen = HashSet::with_capacity(swatches.len());
        let mut colors = Vec::with_capacity(swatches.len());
        for swatch in swatches {
            // custom levels can quantize two swatches onto the same color
            if seen.insert(swatch.color) {
                colors.push(swatch.color);
            } else {
                log::debug!("Dropping duplicate swatch {} ({})", swatch.index, swatch.color);
            }
        }
        Self {
            colors,
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Could not open palette {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let data: PaletteFile = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse palette {}", path.display()))?;
        if data.total_count != 0 && data.total_count != data.colors.len() {
            log::warn!(
                "Palette {} claims {} colors but lists {}",
                path.display(),
                data.total_count,
                data.colors.len()
            );
        }
        let mut palette = Self::from_hex_strings(data.colors.as_slice())?;
        palette.generated_at = data.generated_at;
        Ok(palette)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create palette {}", path.display()))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_file())?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    fn to_file(&self) -> PaletteFile {
        PaletteFile {
            colors: self.colors.iter().map(|c| c.to_hex()).collect(),
            total_count: self.colors.len(),
            generated_at: self.generated_at.clone(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.generated_at.as_deref()
    }
}
