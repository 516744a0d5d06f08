//! Serve command - run the REST API

use scamshield::web::start_server;
use scamshield::Config;
use tracing::info;

pub async fn run(config: &Config, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.server_port);
    let engine = super::build_engine(config)?;

    info!("Serving with {} categories", engine.catalog().categories.len());
    start_server(port, engine, config.db_path.clone()).await
}
