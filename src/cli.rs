use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUT_FILE: &str = "dashboard.html";

#[derive(Parser, Debug)]
#[command(name = "csvdash", version, about = "FDA CSV warning-letter dashboard CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Page configuration file (TOML)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every dataset, then write the self-contained HTML dashboard
    Render {
        #[arg(long, default_value = DEFAULT_OUT_FILE)]
        out: PathBuf,
        #[arg(long, default_value_t = false, help = "Write the page to stdout instead of a file")]
        stdout: bool,
    },
    /// Headline metrics derived from the datasets
    Summary,
    /// List every dataset with row count and measures
    Tables,
    /// Dump one dataset's rows in declared order
    Show {
        #[arg(value_enum)]
        table: TableId,
    },
    /// Dump one dataset's rows in descending-measure order
    Rank {
        #[arg(value_enum)]
        table: TableId,
        #[arg(long, value_enum, help = "Measure to rank by (defaults per table)")]
        by: Option<Measure>,
    },
    /// Sophistication ratio interpretation per region
    Ratios,
    /// Run all dataset invariant checks
    Validate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TableId {
    Yearly,
    Violations,
    Geo,
    Sophistication,
    Facility,
    Growth,
    Cooccurrence,
    Keywords,
    Systems,
}

impl TableId {
    pub fn name(self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::Violations => "violations",
            Self::Geo => "geo",
            Self::Sophistication => "sophistication",
            Self::Facility => "facility",
            Self::Growth => "growth",
            Self::Cooccurrence => "cooccurrence",
            Self::Keywords => "keywords",
            Self::Systems => "systems",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Count,
    Percentage,
    Growth,
    Ratio,
}
