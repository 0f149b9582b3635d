//! `herd solve`

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use herd_algo::{default_solver, FleetConfig, RunOutcome, SourcingConfig, SourcingRun};
use herd_cli::report::write_tables;
use herd_cli::OutputFormat;
use tracing::info;

/// Flags of `herd solve`, gathered from the parsed command.
pub struct SolveArgs<'a> {
    pub tables: &'a Path,
    pub meat_price: f64,
    pub config: Option<&'a Path>,
    pub time_limit: Option<f64>,
    pub mip_gap: Option<f64>,
    pub inbound_trip_capacity: Option<u32>,
    pub outbound_trip_capacity: Option<u32>,
    pub format: OutputFormat,
    pub out: Option<&'a PathBuf>,
}

pub fn handle(args: SolveArgs<'_>) -> Result<()> {
    let config = resolve_config(&args)?;
    let tables = herd_io::load_tables_dir(args.tables)
        .with_context(|| format!("loading tables from {}", args.tables.display()))?;
    info!(tables = tables.len(), dir = %args.tables.display(), "tables loaded");

    let run = SourcingRun::prepare(&tables, args.meat_price, config.clone())
        .context("building sourcing model")?;
    let solver = default_solver(&config).context("selecting solver")?;
    let outcome = run.execute(solver.as_ref()).context("solving sourcing model")?;

    match args.format {
        OutputFormat::Table => write_tables(io::stdout(), &outcome).context("writing report")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &outcome).context("serializing report to JSON")?;
            println!();
        }
    }

    if let Some(path) = args.out {
        write_json(path, &outcome)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(args: &SolveArgs<'_>) -> Result<SourcingConfig> {
    let mut config = match args.config {
        Some(path) => SourcingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SourcingConfig::default(),
    };
    if let Some(secs) = args.time_limit {
        config = config.with_time_budget(secs);
    }
    if args.mip_gap.is_some() {
        config.mip_gap = args.mip_gap;
    }
    let fleet = config.fleet;
    config = config.with_fleet(FleetConfig {
        head_per_inbound_trip: args.inbound_trip_capacity.unwrap_or(fleet.head_per_inbound_trip),
        head_per_outbound_trip: args.outbound_trip_capacity.unwrap_or(fleet.head_per_outbound_trip),
    });
    config.validate().context("invalid run configuration")?;
    Ok(config)
}

fn write_json(path: &Path, outcome: &RunOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("serializing report")?;
    let mut file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    file.write_all(json.as_bytes()).context("writing output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(tables: &Path) -> SolveArgs<'_> {
        SolveArgs {
            tables,
            meat_price: 22_000.0,
            config: None,
            time_limit: None,
            mip_gap: None,
            inbound_trip_capacity: None,
            outbound_trip_capacity: None,
            format: OutputFormat::Table,
            out: None,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herd.toml");
        fs::write(
            &path,
            "time_budget_secs = 5.0\n[fleet]\nhead_per_inbound_trip = 10\nhead_per_outbound_trip = 60\n",
        )
        .unwrap();

        let mut a = args(dir.path());
        a.config = Some(path.as_path());
        a.time_limit = Some(12.0);
        a.inbound_trip_capacity = Some(20);
        let config = resolve_config(&a).unwrap();

        assert_eq!(config.time_budget_secs, 12.0);
        assert_eq!(config.fleet.head_per_inbound_trip, 20);
        assert_eq!(config.fleet.head_per_outbound_trip, 60);
    }

    #[test]
    fn test_defaults_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(&args(dir.path())).unwrap();
        assert_eq!(config, SourcingConfig::default());
    }

    #[test]
    fn test_oversized_time_limit_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.time_limit = Some(1e30);
        assert!(resolve_config(&a).is_err());
    }
}
