// Batch driver: scores every package URL listed in a file and prints one
// JSON record per line, in input order.

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use log::{error, info};
use netscore::{FailedScore, Scorer};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "netscore", version, about = "Score npm and GitHub packages")]
struct Cli {
    /// File with one package URL per line
    file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let input = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let urls: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let scorer = Scorer::from_env().context("setting up the scorer")?;
    info!("Scoring {} package(s)", urls.len());

    let lines = join_all(urls.iter().map(|url| {
        let scorer = scorer.clone();
        async move {
            match scorer.score_url(url).await {
                Ok(report) => serde_json::to_string(&report),
                Err(e) => {
                    error!("Failed to score {url}: {e}");
                    serde_json::to_string(&FailedScore::new(*url))
                }
            }
        }
    }))
    .await;

    for line in lines {
        println!("{}", line?);
    }
    Ok(())
}
