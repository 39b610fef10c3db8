use anyhow::Context;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use equity_collar::config::AppConfig;
use equity_collar::routes;
use equity_collar::services::yahoo::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the equity collar calculator...");

    let config = AppConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    // Bind to 0.0.0.0 so the calculator is reachable from an embedding page
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let provider = YahooClient::new(&config.yahoo_base_url, &config.yahoo_user_agent)
        .context("failed to build Yahoo Finance client")?;
    info!("Option chains will be fetched from {}", config.yahoo_base_url);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    let api = routes::routes(Arc::new(provider)).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
