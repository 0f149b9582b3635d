use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly livestock sourcing optimizer", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and solve a sourcing plan from a directory of CSV tables
    Solve {
        /// Directory holding one `<table>.csv` per input table
        #[arg(long, value_hint = ValueHint::DirPath)]
        tables: PathBuf,
        /// Sale price per kg of meat
        #[arg(long, default_value_t = 22_000.0)]
        meat_price: f64,
        /// TOML run configuration
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// Solver time limit in seconds (overrides the config file)
        #[arg(long)]
        time_limit: Option<f64>,
        /// Relative MIP gap (overrides the config file)
        #[arg(long)]
        mip_gap: Option<f64>,
        /// Head per inbound truck (overrides the config file)
        #[arg(long)]
        inbound_trip_capacity: Option<u32>,
        /// Head per outbound truck (overrides the config file)
        #[arg(long)]
        outbound_trip_capacity: Option<u32>,
        /// Output format for stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Also write the full JSON report to this file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Check a table directory without solving
    Validate {
        /// Directory holding one `<table>.csv` per input table
        #[arg(long, value_hint = ValueHint::DirPath)]
        tables: PathBuf,
    },
    /// Write a sample table directory to start a study from
    Template {
        /// Destination directory (created if missing)
        #[arg(long, value_hint = ValueHint::DirPath)]
        out: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-aligned text tables
    Table,
    /// The full structured report
    Json,
}
