//! Visually distinct colors for a growing population of contributors.
//!
//! A palette is generated once from a tiered hue ladder and reordered so
//! neighbouring entries contrast as much as possible. New contributors then
//! receive the free palette color farthest from every color already in use.

pub mod core;
pub mod util;

pub use crate::core::{Color, Hsl, Palette, Registry};
