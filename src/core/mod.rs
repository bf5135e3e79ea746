pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod distance;
pub mod generator;
pub mod logger;
pub mod palette;
pub mod registry;
pub mod selector;
pub mod sequence;
pub mod validation;

pub use cli::{Command, CommandLineArguments};
pub use color::{Color, ColorParseError, Hsl};
pub use config::Config;
pub use distance::{hsl_distance, rgb_distance, EuclideanRgb, Metric, PerceptualHsl};
pub use generator::{generate, hue_ladder, Generator, Swatch};
pub use logger::Logger;
pub use palette::{Palette, PaletteError};
pub use registry::{Contribution, Entity, Registry, RepairReport, NEUTRAL_COLOR};
pub use selector::{assign, cyclic_fallback, rederive, select_next, Assignment};
pub use sequence::{optimize, optimize_swatches};
pub use validation::{find_duplicates, DuplicateColor, DuplicateReport};
