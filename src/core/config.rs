use super::color::Color;
use super::generator::{Generator, LIGHTNESS_LEVELS, SATURATION_LEVELS};
use super::palette::{Palette, DEFAULT_PALETTE_SIZE};
use super::registry::NEUTRAL_COLOR;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of candidates requested from the generator.
    pub palette_size: usize,
    pub saturation_levels: Vec<f64>,
    pub lightness_levels: Vec<f64>,
    /// Reported for entities without a color.
    pub fallback_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            saturation_levels: SATURATION_LEVELS.to_vec(),
            lightness_levels: LIGHTNESS_LEVELS.to_vec(),
            fallback_color: NEUTRAL_COLOR,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Could not open config {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, levels) in [
            ("saturation_levels", &self.saturation_levels),
            ("lightness_levels", &self.lightness_levels),
        ] {
            if levels.is_empty() {
                bail!("{} must not be empty", name);
            }
            if let Some(level) = levels.iter().find(|l| !(0.0..=1.0).contains(*l)) {
                bail!("{} contains {}, expected a value in [0, 1]", name, level);
            }
        }
        Ok(())
    }

    pub fn generator(&self) -> Generator {
        Generator::new(self.saturation_levels.clone(), self.lightness_levels.clone())
    }

    pub fn palette(&self) -> Palette {
        Palette::build_with(&self.generator(), self.palette_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_the_default_palette() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.palette().colors(), Palette::default().colors());
        assert_eq!(config.generator(), Generator::default());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"palette_size": 12}"#).unwrap();
        assert_eq!(config.palette_size, 12);
        assert_eq!(config.saturation_levels, SATURATION_LEVELS.to_vec());
        assert_eq!(config.palette().len(), 12);
    }

    #[test]
    fn rejects_bad_levels() {
        let mut config = Config::default();
        config.lightness_levels.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.saturation_levels.push(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_and_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path();
        let config = Config {
            palette_size: 24,
            fallback_color: Color::rgb(1, 2, 3),
            ..Default::default()
        };
        config.save(path).unwrap();
        assert_eq!(Config::load(path).unwrap(), config);
    }
}
