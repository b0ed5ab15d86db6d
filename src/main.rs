//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fixture_stats::{
    cli::{Commands, FixtureStatsCli},
    commands::{
        batch_report::handle_batch_report,
        common::CommandContext,
        fixture_report::{handle_fixture_report, FixtureReportParams},
        name_match::{handle_canon, handle_name_match},
        recent_matches::{handle_recent_matches, RecentMatchesParams},
    },
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let app = FixtureStatsCli::parse();

    match app.command {
        Commands::Report {
            similar,
            panel,
            archive,
            home,
            away,
            date,
            anchors,
            fixture_id,
            limit,
            json,
            out,
        } => {
            let ctx = CommandContext::new(app.config.as_deref())?;
            handle_fixture_report(
                &ctx,
                FixtureReportParams {
                    similar,
                    panel,
                    archive,
                    home,
                    away,
                    date,
                    anchors,
                    fixture_id,
                    limit,
                    as_json: json,
                    out,
                },
            )
            .await?
        }

        Commands::Recent {
            archive,
            team,
            side,
            before,
            limit,
            anchors,
            json,
        } => {
            let ctx = CommandContext::new(app.config.as_deref())?;
            let params = RecentMatchesParams {
                archive,
                team,
                side,
                before,
                limit,
                anchors,
                as_json: json,
            };
            handle_recent_matches(&ctx, params).await?
        }

        Commands::Match {
            name,
            candidates,
            json,
        } => handle_name_match(&name, &candidates, json)?,

        Commands::Canon { names } => handle_canon(&names)?,

        Commands::Batch { manifest, json } => {
            let ctx = CommandContext::new(app.config.as_deref())?;
            handle_batch_report(&ctx, &manifest, json).await?
        }
    }

    Ok(())
}
