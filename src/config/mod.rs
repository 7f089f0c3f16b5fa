pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// One file per term of a year, one row per (course, instructor)
    Roster,
    /// One file for a single term, one row per section with all instructors
    Sections,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "course-roster")]
#[command(about = "Exports course sections and their instructors to CSV")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roster-config.toml")]
    pub config: String,

    #[arg(long, value_enum, default_value = "roster")]
    pub mode: RunMode,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    pub monitor: Option<bool>,
}
