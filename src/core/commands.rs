use super::cli::Command;
use super::config::Config;
use super::palette::Palette;
use super::registry::Registry;
use crate::util::{normalize_timestamp, now_timestamp};
use anyhow::{anyhow, Result};
use std::path::Path;

pub fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Palette { count, output } => {
            let palette = match count {
                Some(count) => Palette::build_with(&config.generator(), *count),
                None => config.palette(),
            };
            log::info!("Generated {} colors", palette.len());
            match output {
                Some(path) => {
                    palette.save(path)?;
                    log::info!("Palette saved to {}", path.display());
                }
                None => println!("{}", palette.to_json()?),
            }
        }
        Command::Assign {
            state,
            id,
            registered,
            palette,
        } => {
            let palette = load_palette(palette.as_deref(), config)?;
            let registered = match registered {
                Some(timestamp) => normalize_timestamp(timestamp)?,
                None => now_timestamp(),
            };
            let mut registry = Registry::load_or_default(state)?;
            let color = registry
                .assign(id, &registered, palette.colors())
                .ok_or_else(|| anyhow!("Palette is empty, no colors available"))?;
            registry.save(state)?;
            println!("{} {}", id, color);
        }
        Command::Lookup { state, id } => {
            let registry = Registry::load(state)?;
            if registry.entity(id).is_none() {
                log::warn!("Unknown entity {}", id);
            }
            println!("{}", registry.color_or(id, config.fallback_color));
        }
        Command::Contributions { state } => {
            let registry = Registry::load(state)?;
            let counts = registry.contribution_counts();
            log::info!(
                "{} contributions from {} contributors",
                registry.contributions.len(),
                counts.len()
            );
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        Command::Validate { state } => {
            let registry = Registry::load(state)?;
            let report = registry.validate();
            if !report.is_unique() {
                for (a, b, color) in report.pairs() {
                    println!("{} {} {}", color, a, b);
                }
                return Err(anyhow!(
                    "{} colors are shared by more than one entity",
                    report.duplicates.len()
                ));
            }
            println!("{} entities, all colors unique", report.checked);
        }
        Command::Rederive {
            state,
            palette,
            dry_run,
        } => {
            let palette = load_palette(palette.as_deref(), config)?;
            let mut registry = Registry::load(state)?;
            let assignment = registry.rederive(palette.colors());
            if *dry_run {
                println!("{}", serde_json::to_string_pretty(&assignment.colors)?);
            } else {
                registry.save(state)?;
                log::info!("Rederived {} colors", assignment.len());
            }
        }
        Command::Repair { state, palette } => {
            let palette = load_palette(palette.as_deref(), config)?;
            let mut registry = Registry::load(state)?;
            let report = registry.repair(palette.colors());
            if report.rederived || report.contributions_updated > 0 {
                registry.save(state)?;
            }
            if !registry.validate().is_unique() {
                log::warn!(
                    "{} entities share colors with a palette of {}",
                    registry.entities.len(),
                    palette.len()
                );
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn load_palette(path: Option<&Path>, config: &Config) -> Result<Palette> {
    match path {
        Some(path) => Palette::load(path),
        None => Ok(config.palette()),
    }
}
