use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use reqwest::Client;
use statcan_reshape::{diagnostics::TracingSink, error::ReshapeError, output, run, settings::Settings};
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reshape a statistical data table CSV into facet-keyed JSON"
)]
struct Args {
    /// Data table CSV download URL; must carry a `pid` query parameter
    data_url: String,
    /// Output file (defaults to stdout; pass "" to write to stdout and still give facets)
    output: Option<String>,
    /// Facet columns, outermost first (defaults to GEO)
    facets: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,statcan_reshape=debug"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let err = ReshapeError::Usage(e.to_string());
            error!("{}", err);
            return ExitCode::from(1);
        }
    };
    debug!(data_url = %args.data_url, "data URL");

    let settings = Settings::new(args.data_url, args.output.map(PathBuf::from), args.facets);
    debug!(output = ?settings.output, "output path");
    debug!(facets = ?settings.facets, "facet columns");

    // ─── 3) fetch, reshape, write ────────────────────────────────────
    match execute(&settings).await {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn execute(settings: &Settings) -> anyhow::Result<()> {
    let client = Client::new();
    let json = run(settings, &client, &TracingSink)
        .await
        .context("building facet JSON")?;
    output::write_output(&json, settings.output.as_deref()).context("writing output")?;
    Ok(())
}
