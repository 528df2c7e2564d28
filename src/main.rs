use anyhow::{Context, Result};
use clap::Parser;
use mdtransform::cli::{self, Args};
use mdtransform::core::config::ConfigLoader;
use mdtransform::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let working_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let config_path = ConfigLoader::resolve_path(args.config.as_deref(), &working_dir);
    let _logging = logging::init(&args.command, &config_path)?;
    cli::commands::run(args, &config_path).await
}
