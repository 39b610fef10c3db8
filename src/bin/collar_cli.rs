// src/bin/collar_cli.rs
//
// Usage: collar_cli [TICKER] [ENTRY_PRICE] [SHARES] [PUT_STRIKE] [CALL_STRIKE] [EXPIRATION]
// Omitted arguments fall back to the form defaults.
use anyhow::{Context, Result};
use log::{error, info};
use std::env;
use std::process;

use equity_collar::config::AppConfig;
use equity_collar::handlers::collar::{run_calculation, CollarForm};
use equity_collar::services::yahoo::YahooClient;

// Rows printed from the 100-point curve.
const TABLE_ROWS: usize = 12;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(idx) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} must be a number, got {:?}", name, raw)),
        None => Ok(default),
    }
}

fn form_from_args(args: &[String]) -> Result<CollarForm> {
    let defaults = CollarForm::default();
    Ok(CollarForm {
        ticker: args.first().cloned().unwrap_or(defaults.ticker),
        entry_price: parse_arg(args, 1, "entry price", defaults.entry_price)?,
        shares: parse_arg(args, 2, "shares", defaults.shares)?,
        put_strike: parse_arg(args, 3, "put strike", defaults.put_strike)?,
        call_strike: parse_arg(args, 4, "call strike", defaults.call_strike)?,
        expiration: args.get(5).cloned().unwrap_or(defaults.expiration),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let form = form_from_args(&args)?;
    let config = AppConfig::from_env()?;
    let provider = YahooClient::new(&config.yahoo_base_url, &config.yahoo_user_agent)?;

    info!("Calculating collar for {:?}", form);

    let response = match run_calculation(&provider, &form).await {
        Ok(response) => response,
        Err(e) => {
            error!("Collar calculation failed: {}", e);
            eprintln!("Something went wrong: {}", e);
            process::exit(1);
        }
    };

    println!("Equity Collar Calculator: {} {}", response.params.ticker, response.params.expiration);
    println!();
    for line in response.summary.lines() {
        println!("  {}", line);
    }

    println!();
    println!("{:>12} | {:>16}", "Price", "Net P/L ($)");
    println!("{:-<12}-+-{:-<16}", "", "");
    let curve = &response.result.payoff_curve;
    let stride = (curve.len() / TABLE_ROWS).max(1);
    for (i, point) in curve.iter().enumerate() {
        if i % stride == 0 || i + 1 == curve.len() {
            println!("{:>12.2} | {:>16.2}", point.price, point.net_profit);
        }
    }

    Ok(())
}
