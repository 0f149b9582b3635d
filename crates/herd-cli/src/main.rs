use clap::Parser;
use herd_cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::solve::SolveArgs;

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Solve {
            tables,
            meat_price,
            config,
            time_limit,
            mip_gap,
            inbound_trip_capacity,
            outbound_trip_capacity,
            format,
            out,
        } => commands::solve::handle(SolveArgs {
            tables,
            meat_price: *meat_price,
            config: config.as_deref(),
            time_limit: *time_limit,
            mip_gap: *mip_gap,
            inbound_trip_capacity: *inbound_trip_capacity,
            outbound_trip_capacity: *outbound_trip_capacity,
            format: *format,
            out: out.as_ref(),
        }),
        Commands::Validate { tables } => commands::validate::handle(tables),
        Commands::Template { out } => commands::template::handle(out),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {err}");
    }

    if let Err(err) = run(&cli) {
        error!("{err:?}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
