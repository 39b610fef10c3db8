// src/bin/debug_yahoo.rs
use chrono::NaiveDate;
use dotenv::dotenv;
use log::{error, info};
use std::env;

use equity_collar::config::AppConfig;
use equity_collar::services::provider::OptionChainProvider;
use equity_collar::services::yahoo::YahooClient;
use equity_collar::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    env_logger::init();

    let ticker = env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let config = AppConfig::from_env()?;
    let client = YahooClient::new(&config.yahoo_base_url, &config.yahoo_user_agent)?;

    info!("Listing Yahoo Finance expirations for {}...", ticker);
    let expirations = client.list_expirations(&ticker).await?;
    for date in &expirations {
        println!("{}", date);
    }

    // Dump the first listed chain unless a date was given.
    let expiration = match env::args().nth(2) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?,
        None => match expirations.first() {
            Some(date) => *date,
            None => {
                error!("No expirations listed for {}", ticker);
                return Err(format!("no expirations listed for {}", ticker).into());
            }
        },
    };

    let chain = client.get_option_chain(&ticker, expiration).await?;
    info!(
        "{} {}: {} puts, {} calls",
        chain.ticker,
        chain.expiration,
        chain.puts.len(),
        chain.calls.len()
    );

    println!("{:>6} {:>10} {:>8} {:>8}", "leg", "strike", "bid", "ask");
    for (leg, rows) in [("put", &chain.puts), ("call", &chain.calls)] {
        for row in rows {
            println!("{:>6} {:>10.2} {:>8.2} {:>8.2}", leg, row.strike, row.bid, row.ask);
        }
    }

    Ok(())
}
