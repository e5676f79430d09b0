mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    // Logs go to stderr so JSON printed on stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskload=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            prior,
            marker,
            sentinel,
        } => {
            commands::extract::handle(input, output, prior, marker, sentinel)?;
        }

        Commands::Obstacles { input, marker } => {
            commands::obstacles::handle(input, marker)?;
        }

        Commands::Inspect {
            input,
            sheet,
            rows,
            cols,
        } => {
            commands::inspect::handle(input, &sheet, rows, cols)?;
        }

        Commands::Score {
            input,
            output,
            level,
            sentinel,
        } => {
            commands::score::handle(&input, output, level, sentinel)?;
        }

        Commands::Configure {
            input,
            output,
            marker,
            sentinel,
            show,
        } => {
            commands::configure::handle(input, output, marker, sentinel, show)?;
        }
    }

    Ok(())
}
