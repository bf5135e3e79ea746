use super::color::Color;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateColor {
    pub color: Color,
    /// Entity ids holding `color`, in the order they were checked.
    pub holders: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub checked: usize,
    pub duplicates: Vec<DuplicateColor>,
}

impl DuplicateReport {
    pub fn is_unique(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Every pair of distinct entities sharing a color.
    pub fn pairs(&self) -> Vec<(&str, &str, Color)> {
        let mut pairs = vec![];
        for duplicate in &self.duplicates {
            for (i, a) in duplicate.holders.iter().enumerate() {
                for b in &duplicate.holders[i + 1..] {
                    pairs.push((a.as_str(), b.as_str(), duplicate.color));
                }
            }
        }
        pairs
    }

    /// Number of entities that would need a new color for the mapping to be
    /// unique.
    pub fn excess(&self) -> usize {
        self.duplicates.iter().map(|d| d.holders.len() - 1).sum()
    }
}

/// Report every color held by more than one entity.
pub fn find_duplicates<I, K>(mapping: I) -> DuplicateReport
where
    I: IntoIterator<Item = (K, Color)>,
    K: Into<String>,
{
    let mut holders: BTreeMap<Color, Vec<String>> = BTreeMap::new();
    let mut checked = 0;
    for (id, color) in mapping {
        checked += 1;
        holders.entry(color).or_default().push(id.into());
    }
    let duplicates: Vec<DuplicateColor> = holders
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(color, holders)| DuplicateColor { color, holders })
        .collect();
    if !duplicates.is_empty() {
        metrics::counter!("count.duplicate_colors", duplicates.len() as u64);
    }
    DuplicateReport {
        checked,
        duplicates,
    }
}
