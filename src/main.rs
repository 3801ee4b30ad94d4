use anyhow::{bail, Context, Result};
use clap::Parser;
use gemrag::args::Cli;
use gemrag::config::Config;
use gemrag::logging::{default_log_path, init_tracing};
use gemrag::ui::runtime::{run, GeneratorKind};

fn main() {
    if let Err(err) = try_main() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(model) = cli.model {
        config.gemini.model = model;
    }
    config.validate()?;

    let generator = if cli.offline {
        GeneratorKind::Offline
    } else {
        match config.gemini.resolve_api_key() {
            Some(api_key) => GeneratorKind::Gemini { api_key },
            None => bail!(
                "No Gemini API key: set gemini.api_key in the config file or the {} environment variable",
                config.gemini.api_key_env
            ),
        }
    };

    let log_path = cli
        .log_file
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(default_log_path);
    init_tracing(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting gemrag");

    run(config, generator, cli.prompt)
}
