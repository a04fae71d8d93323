use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use warmpool::{config::Config, logging, server, sheet::GvizSource};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    info!("Starting warm pool candidates service");

    let config = Config::from_env()?;
    info!(sheet = %config.sheet.sheet_name, "reading pool from sheet");

    let source = GvizSource::new(Client::new(), &config.sheet).context("building sheet URL")?;
    server::serve(Arc::new(source), config.port).await;

    Ok(())
}
