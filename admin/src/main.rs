use admin::cli::{self, Cli};
use admin::config::{self, ConfigLoadResult};
use anyhow::{Context, bail};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match config::init_config(cli.config.as_deref()) {
        ConfigLoadResult::Success(config) => config,
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => bail!("{e}"),
    };

    admin::logger::setup_logger(app_config.logging(), cli.verbose)
        .context("Failed to initialize logger")?;

    let mut stdout = std::io::stdout().lock();
    cli::run(cli, app_config, &mut stdout).await?;
    Ok(())
}
