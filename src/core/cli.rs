use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assign visually distinct colors to contributors
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Path to configuration json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate the contrast-ordered palette
    Palette {
        /// Number of candidate colors to generate
        #[arg(long)]
        count: Option<usize>,
        /// Write the palette json here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Assign a color to one entity, keeping any color it already has
    Assign {
        /// Path to the assignment state json
        #[arg(long)]
        state: PathBuf,
        /// Entity id, e.g. an email address
        #[arg(long)]
        id: String,
        /// Registration time (RFC 3339), defaults to now
        #[arg(long)]
        registered: Option<String>,
        /// Palette json, defaults to the generated palette
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Print the color of one entity
    Lookup {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        id: String,
    },
    /// Print how many contributions each contributor has
    Contributions {
        #[arg(long)]
        state: PathBuf,
    },
    /// Check that no two entities share a color
    Validate {
        #[arg(long)]
        state: PathBuf,
    },
    /// Reassign every color from scratch in registration order
    Rederive {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        palette: Option<PathBuf>,
        /// Print the new mapping without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Rederive if colors are shared, then update contribution colors
    Repair {
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        palette: Option<PathBuf>,
    },
}
