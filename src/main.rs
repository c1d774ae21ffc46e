use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cochange::cli::{Cli, prompt_dataset_path};
use cochange::mining;
use cochange::store::JsonArtifactStore;
use cochange::Pipeline;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cochange=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = match &cli.dataset {
        Some(path) => path.clone(),
        None => prompt_dataset_path()?,
    };

    let config = cli.config();
    let store = JsonArtifactStore::new(&config.output_dir);
    let progress = mining::reporter(config.quiet);

    Pipeline::new(&config, &store, progress.as_ref()).run_dataset(&dataset)?;
    Ok(())
}
