use super::color::Color;
use super::selector::{self, Assignment};
use super::validation::{find_duplicates, DuplicateReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Color reported for entities that have none.
pub const NEUTRAL_COLOR: Color = Color::rgb(0x66, 0x66, 0x66);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    /// ISO-8601 timestamp; decides who gets a color first.
    #[serde(default)]
    pub registration_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A record that carries a copy of its contributor's color.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub contributor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_color: Option<Color>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub rederived: bool,
    pub duplicates_before: usize,
    pub entities_changed: usize,
    pub contributions_updated: usize,
}

/// Assignment state: who has which color, and the contributions that
/// mirror those colors.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

impl Registry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Could not open state {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let registry = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse state {}", path.display()))?;
        Ok(registry)
    }

    /// Like [`Registry::load`], but a missing file is an empty registry.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("{} does not exist, starting empty", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create state {}", path.display()))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn color_of(&self, id: &str) -> Color {
        self.color_or(id, NEUTRAL_COLOR)
    }

    pub fn color_or(&self, id: &str, fallback: Color) -> Color {
        self.entity(id).and_then(|e| e.color).unwrap_or(fallback)
    }

    /// Colors currently in use, duplicates included.
    pub fn assigned_colors(&self) -> Vec<Color> {
        self.entities.iter().filter_map(|e| e.color).collect()
    }

    pub fn mapping(&self) -> BTreeMap<String, Color> {
        self.entities
            .iter()
            .filter_map(|e| e.color.map(|c| (e.id.clone(), c)))
            .collect()
    }

    /// Give `id` a color, registering it first if it is unknown.
    ///
    /// An entity that already has a color keeps it. `None` only when the
    /// pool is empty.
    pub fn assign(&mut self, id: &str, registration_date: &str, pool: &[Color]) -> Option<Color> {
        if let Some(color) = self.entity(id).and_then(|e| e.color) {
            log::debug!("{} already has {}", id, color);
            return Some(color);
        }

        let assigned = self.assigned_colors();
        let color = selector::assign(assigned.len(), &assigned, pool)?;
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => entity.color = Some(color),
            None => self.entities.push(Entity {
                id: id.to_owned(),
                registration_date: registration_date.to_owned(),
                color: Some(color),
            }),
        }
        metrics::increment_counter!("count.colors_assigned");
        log::info!(
            "Assigned {} to {} ({}/{})",
            color,
            id,
            assigned.len() + 1,
            pool.len()
        );
        Some(color)
    }

    /// Recompute every entity's color from scratch in registration order.
    /// Returns the new mapping; entities are updated in place.
    pub fn rederive(&mut self, pool: &[Color]) -> Assignment {
        let assignment = selector::rederive(
            self.entities
                .iter()
                .map(|e| (e.id.clone(), e.registration_date.clone())),
            pool,
        );
        for entity in &mut self.entities {
            let color = assignment.get(&entity.id);
            if color != entity.color {
                log::info!(
                    "{}: {} -> {}",
                    entity.id,
                    display(entity.color),
                    display(color)
                );
            }
            entity.color = color;
        }
        assignment
    }

    pub fn validate(&self) -> DuplicateReport {
        let report = find_duplicates(
            self.entities
                .iter()
                .filter_map(|e| e.color.map(|c| (e.id.as_str(), c))),
        );
        for (a, b, color) in report.pairs() {
            log::warn!("{} and {} share {}", a, b, color);
        }
        report
    }

    /// Copy each contributor's color onto their contributions. Returns how
    /// many contributions changed.
    pub fn recolor_contributions(&mut self, mapping: &BTreeMap<String, Color>) -> usize {
        let mut updated = 0;
        for contribution in &mut self.contributions {
            let Some(color) = mapping.get(&contribution.contributor_id) else {
                continue;
            };
            if contribution.contributor_color != Some(*color) {
                log::debug!(
                    "Contribution {}: {} -> {}",
                    contribution.id,
                    display(contribution.contributor_color),
                    color
                );
                contribution.contributor_color = Some(*color);
                updated += 1;
            }
        }
        updated
    }

    /// Contributions per contributor. Registered entities without any are
    /// listed with zero.
    pub fn contribution_counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> =
            self.entities.iter().map(|e| (e.id.clone(), 0)).collect();
        for contribution in &self.contributions {
            if self.entity(&contribution.contributor_id).is_none() {
                log::warn!(
                    "Contribution {} belongs to unknown contributor {}",
                    contribution.id,
                    contribution.contributor_id
                );
            }
            *counts.entry(contribution.contributor_id.clone()).or_default() += 1;
        }
        counts
    }

    /// Re-derive colors if any are shared, then bring contributions in line
    /// with the entity colors.
    pub fn repair(&mut self, pool: &[Color]) -> RepairReport {
        let before = self.validate();
        let mut report = RepairReport {
            duplicates_before: before.excess(),
            ..Default::default()
        };
        if !before.is_unique() {
            let previous = self.mapping();
            self.rederive(pool);
            report.rederived = true;
            report.entities_changed = self
                .entities
                .iter()
                .filter(|e| previous.get(&e.id).copied() != e.color)
                .count();
        }
        let mapping = self.mapping();
        report.contributions_updated = self.recolor_contributions(&mapping);
        report
    }
}

fn display(color: Option<Color>) -> String {
    color.map_or_else(|| "N/A".to_owned(), |c| c.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette::Palette;

    fn entity(id: &str, date: &str, color: Option<&str>) -> Entity {
        Entity {
            id: id.to_owned(),
            registration_date: date.to_owned(),
            color: color.map(|c| Color::from_hex(c).unwrap()),
        }
    }

    #[test]
    fn assign_is_stable() {
        let palette = Palette::default();
        let mut registry = Registry::default();
        let first = registry.assign("a@x.org", "2024-01-01", palette.colors()).unwrap();
        assert_eq!(first, palette.colors()[0]);
        let second = registry.assign("b@x.org", "2024-01-02", palette.colors()).unwrap();
        assert_ne!(first, second);

        let snapshot = registry.clone();
        assert_eq!(registry.assign("a@x.org", "2030-01-01", palette.colors()), Some(first));
        assert_eq!(registry, snapshot);
    }

    #[test]
    fn assign_colors_an_existing_uncolored_entity() {
        let pool = [Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)];
        let mut registry = Registry {
            entities: vec![entity("a", "2024-01-01", None)],
            ..Default::default()
        };
        assert_eq!(registry.assign("a", "ignored", &pool), Some(pool[0]));
        assert_eq!(registry.entities.len(), 1);
        assert_eq!(registry.entities[0].registration_date, "2024-01-01");
    }

    #[test]
    fn assign_falls_back_cyclically() {
        let pool = [Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)];
        let mut registry = Registry::default();
        let colors: Vec<Color> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| registry.assign(id, "2024", &pool).unwrap())
            .collect();
        assert_eq!(colors, vec![pool[0], pool[1], pool[0], pool[1], pool[0]]);
        assert_eq!(registry.assign("z", "2024", &[]), None);
    }

    #[test]
    fn color_of_unknown_is_neutral() {
        let registry = Registry {
            entities: vec![entity("a", "", None)],
            ..Default::default()
        };
        assert_eq!(registry.color_of("nobody"), NEUTRAL_COLOR);
        assert_eq!(registry.color_of("a"), NEUTRAL_COLOR);
        assert_eq!(NEUTRAL_COLOR.to_hex(), "#666666");
        assert_eq!(registry.color_or("a", Color::rgb(1, 1, 1)), Color::rgb(1, 1, 1));
    }

    #[test]
    fn repair_fixes_duplicates_and_contributions() {
        let palette = Palette::default();
        let mut registry = Registry {
            entities: vec![
                entity("late", "2024-03-01T00:00:00.000Z", Some("#f43d3d")),
                entity("early", "2024-01-01T00:00:00.000Z", Some("#f43d3d")),
                entity("mid", "2024-02-01T00:00:00.000Z", Some("#3dddf4")),
            ],
            contributions: vec![
                Contribution {
                    id: "m1".into(),
                    contributor_id: "late".into(),
                    contributor_color: Color::from_hex("#f43d3d").ok(),
                },
                Contribution {
                    id: "m2".into(),
                    contributor_id: "ghost".into(),
                    contributor_color: None,
                },
            ],
        };
        assert!(!registry.validate().is_unique());

        let report = registry.repair(palette.colors());
        assert!(report.rederived);
        assert_eq!(report.duplicates_before, 1);
        assert!(registry.validate().is_unique());
        assert_eq!(registry.color_of("early"), palette.colors()[0]);
        assert_eq!(registry.color_of("mid"), Color::from_hex("#3dddf4").unwrap());
        assert_eq!(registry.color_of("late"), Color::from_hex("#1ead1e").unwrap());
        assert_eq!(report.entities_changed, 1);
        assert_eq!(report.contributions_updated, 1);
        assert_eq!(
            registry.contributions[0].contributor_color,
            Some(registry.color_of("late"))
        );
        assert_eq!(registry.contributions[1].contributor_color, None);

        let again = registry.repair(palette.colors());
        assert_eq!(again, RepairReport::default());
    }

    #[test]
    fn counts_contributions_per_contributor() {
        let contribution = |id: &str, contributor: &str| Contribution {
            id: id.into(),
            contributor_id: contributor.into(),
            contributor_color: None,
        };
        let registry = Registry {
            entities: vec![
                entity("a", "2024-01-01", None),
                entity("b", "2024-01-02", None),
            ],
            contributions: vec![
                contribution("m1", "a"),
                contribution("m2", "ghost"),
                contribution("m3", "a"),
            ],
        };
        let counts = registry.contribution_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 0);
        assert_eq!(counts["ghost"], 1);
        assert!(Registry::default().contribution_counts().is_empty());
    }

    #[test]
    fn serde_layout() {
        let json = r##"{
            "entities": [
                {"id": "a@x.org", "registrationDate": "2024-01-01T00:00:00.000Z", "color": "#F43D3D"},
                {"id": "b@x.org"}
            ]
        }"##;
        let registry: Registry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.entities[0].color, Color::from_hex("#f43d3d").ok());
        assert_eq!(registry.entities[1].registration_date, "");
        assert!(registry.contributions.is_empty());

        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(value["entities"][0]["color"], "#f43d3d");
        assert_eq!(value["entities"][0]["registrationDate"], "2024-01-01T00:00:00.000Z");
        assert!(value["entities"][1].get("color").is_none());
    }
}
