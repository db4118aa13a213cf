//! netavail - Device availability reports
//!
//! Pulls devices and their outage/availability history from a
//! LibreNMS-style monitoring API and renders spreadsheet reports, one
//! device at a time, sequentially.

mod api;
mod cli;
mod config;
mod report;
mod stats;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use config::Config;
use report::ReportError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = cli::Args::parse();

    let mut cfg = Config::load();
    cfg.validate()?;

    // Console logging plus an append-only file for warnings and errors.
    let file_appender = tracing_appender::rolling::never(".", &cfg.log_path);
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive("netavail=info".parse()?),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(LevelFilter::WARN),
        )
        .init();

    let client = api::ApiClient::new(&cfg)?;

    match args.command {
        cli::Command::Range { start, end } => {
            let range = match cli::parse_range(&start, &end) {
                Ok(range) => range,
                Err(e) => {
                    eprintln!("invalid date argument: {}", e);
                    eprintln!("usage: netavail range DD-MM-YYYY DD-MM-YYYY");
                    std::process::exit(2);
                }
            };

            match report::range::run(&client, range, &start, &end).await {
                Ok(file) => println!("Report written: {}", file),
                Err(ReportError::Empty) => {
                    tracing::warn!("no devices returned, report not generated");
                    println!("No valid data found; report not generated.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        cli::Command::Daily => loop {
            let start = cli::prompt_date("Start date (YYYY-MM-DD): ")?;
            let end = cli::prompt_date("End date (YYYY-MM-DD): ")?;

            if start > end {
                println!("Start date must not be after the end date.");
            } else {
                println!("Generating report...");
                match report::daily::run(&client, start, end).await {
                    Ok(file) => println!("Report written: {}", file),
                    Err(ReportError::Empty) => {
                        tracing::warn!("no rows assembled, report not generated");
                        println!("No valid data found; report not generated.");
                    }
                    Err(e) => {
                        tracing::error!("report failed: {}", e);
                        eprintln!("Report failed: {}", e);
                    }
                }
            }

            if !cli::prompt_continue("Generate another report? (s/n): ")? {
                break;
            }
        },
    }

    Ok(())
}
