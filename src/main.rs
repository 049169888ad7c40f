// src/main.rs
// =============================================================================
// Entry point of the celeb-sampler CLI.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments and load the configuration
// 3. Dispatch to the subcommand handler
// 4. Exit with 0 on success (partial samples included), 2 on errors
// =============================================================================

mod cli;
mod compare;
mod config;
mod crawl;
mod fetch;
mod pipeline;
mod profile;
mod slug;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use fetch::{Politeness, Session};
use pipeline::WriteMode;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("celeb_sampler=info"));

    // Logs go to stderr so the comparison summary on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_data_dir(cli.data_dir.as_deref());

    let politeness = if cli.no_delay {
        Politeness::none()
    } else {
        Politeness::from_config(&config)
    };

    match cli.command {
        Commands::Snowball {
            start_slug,
            target_num,
            out,
        } => {
            let out = out.unwrap_or_else(|| {
                config.data_dir.join(format!("{}_snowball.jsonl", start_slug))
            });
            let fetcher = fetch::configure_transport(&config, !cli.no_cache)?;
            let session = Session::new(fetcher.as_ref(), &config, politeness);
            handle_snowball(&session, &start_slug, target_num, out).await
        }
        Commands::Alphabet {
            number_per_letter,
            out,
        } => {
            let out = out.unwrap_or_else(|| {
                config.data_dir.join(format!("alphabet_{}.jsonl", number_per_letter))
            });
            let fetcher = fetch::configure_transport(&config, !cli.no_cache)?;
            let session = Session::new(fetcher.as_ref(), &config, politeness);
            handle_alphabet(&session, number_per_letter, out).await
        }
        Commands::Compare { snow, alpha, out } => compare::run_comparison(&snow, &alpha, &out),
    }
}

// Snowball run: BFS for slugs, then fetch and append their records.
// Appending keeps earlier runs for the same seed.
async fn handle_snowball(
    session: &Session<'_>,
    start_slug: &str,
    target_num: usize,
    out: PathBuf,
) -> Result<()> {
    let slugs = crawl::snowball_sample(session, start_slug, target_num).await;
    info!(count = slugs.len(), "Total slugs discovered");

    let written = pipeline::write_profiles(session, &slugs, &out, WriteMode::Append).await?;
    if written == 0 {
        error!(seed = start_slug, "No records collected");
    }

    info!(path = %out.display(), written, "All done, output written");
    Ok(())
}

// Alphabetical run: K slugs per letter, then fetch and write (fresh file)
async fn handle_alphabet(session: &Session<'_>, per_letter: usize, out: PathBuf) -> Result<()> {
    let slugs = crawl::alphabet_sample(session, per_letter).await;

    if slugs.is_empty() {
        error!("No slugs collected; exiting");
        return Ok(());
    }

    let written = pipeline::write_profiles(session, &slugs, &out, WriteMode::Overwrite).await?;
    info!(path = %out.display(), written, total = slugs.len(), "Done, output written");
    Ok(())
}
