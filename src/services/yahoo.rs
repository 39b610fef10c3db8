// src/services/yahoo.rs
use chrono::{DateTime, NaiveDate};
use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

use crate::models::{OptionChain, OptionQuote};
use crate::services::error::{CollarError, Result};
use crate::services::provider::OptionChainProvider;

// Yahoo Finance v7 options response. Only the fields the calculator reads are modelled.
#[derive(Debug, Deserialize)]
struct OptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: OptionChainEnvelope,
}

#[derive(Debug, Deserialize)]
struct OptionChainEnvelope {
    #[serde(default)]
    result: Vec<OptionsResult>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsResult {
    #[serde(rename = "underlyingSymbol")]
    underlying_symbol: Option<String>,
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<OptionsForExpiration>,
}

#[derive(Debug, Deserialize)]
struct OptionsForExpiration {
    #[serde(default)]
    calls: Vec<YahooContract>,
    #[serde(default)]
    puts: Vec<YahooContract>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooContract {
    contract_symbol: Option<String>,
    strike: f64,
    #[serde(default)]
    bid: f64,
    #[serde(default)]
    ask: f64,
    last_price: Option<f64>,
    volume: Option<u64>,
    open_interest: Option<u64>,
    implied_volatility: Option<f64>,
}

impl From<YahooContract> for OptionQuote {
    fn from(c: YahooContract) -> Self {
        OptionQuote {
            strike: c.strike,
            bid: c.bid,
            ask: c.ask,
            contract_symbol: c.contract_symbol,
            last_price: c.last_price,
            volume: c.volume,
            open_interest: c.open_interest,
            implied_volatility: c.implied_volatility,
        }
    }
}

fn parse_options_response(ticker: &str, body: &str) -> Result<OptionsResult> {
    let response: OptionsResponse = serde_json::from_str(body)?;
    let envelope = response.option_chain;

    if let Some(err) = envelope.error {
        let description = err
            .description
            .or(err.code)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(CollarError::DataProvider(format!(
            "Yahoo Finance error for {}: {}",
            ticker, description
        )));
    }

    envelope
        .result
        .into_iter()
        .next()
        .ok_or_else(|| CollarError::DataProvider(format!("No option data found for {}", ticker)))
}

/// Listed expirations as (UTC calendar date, unix timestamp) pairs.
fn expiration_index(result: &OptionsResult) -> Vec<(NaiveDate, i64)> {
    result
        .expiration_dates
        .iter()
        .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| (dt.date_naive(), ts)))
        .collect()
}

fn resolve_expiration(index: &[(NaiveDate, i64)], expiration: NaiveDate) -> Result<i64> {
    index
        .iter()
        .find(|(date, _)| *date == expiration)
        .map(|(_, ts)| *ts)
        .ok_or_else(|| {
            let available: Vec<String> = index.iter().map(|(date, _)| date.to_string()).collect();
            CollarError::DataProvider(format!(
                "Expiration `{}` cannot be found. Available expirations are: [{}]",
                expiration,
                available.join(", ")
            ))
        })
}

fn chain_from_result(ticker: &str, expiration: NaiveDate, result: OptionsResult) -> Result<OptionChain> {
    let ticker = result.underlying_symbol.unwrap_or_else(|| ticker.to_string());
    let contracts = result.options.into_iter().next().ok_or_else(|| {
        CollarError::DataProvider(format!("No contracts listed for {} at {}", ticker, expiration))
    })?;

    Ok(OptionChain {
        ticker,
        expiration,
        puts: contracts.puts.into_iter().map(OptionQuote::from).collect(),
        calls: contracts.calls.into_iter().map(OptionQuote::from).collect(),
    })
}

/// Option chain client for Yahoo Finance's public options endpoint.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(YahooClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn options_url(&self, ticker: &str) -> String {
        format!("{}/v7/finance/options/{}", self.base_url, ticker.to_uppercase())
    }

    async fn fetch_options(&self, ticker: &str, date: Option<i64>) -> Result<OptionsResult> {
        let mut request = self.client.get(self.options_url(ticker));
        if let Some(ts) = date {
            request = request.query(&[("date", ts)]);
        }

        let body = request
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                error!("Yahoo options request for {} failed: {}", ticker, e);
                CollarError::from(e)
            })?
            .text()
            .await?;

        parse_options_response(ticker, &body)
    }

    async fn fetch_chain(&self, ticker: String, expiration: NaiveDate) -> Result<OptionChain> {
        info!("Fetching Yahoo option expirations for {}", ticker);
        let listing = self.fetch_options(&ticker, None).await?;
        let ts = resolve_expiration(&expiration_index(&listing), expiration)?;

        info!("Fetching Yahoo option chain for {} at {} ({})", ticker, expiration, ts);
        let result = self.fetch_options(&ticker, Some(ts)).await?;
        let chain = chain_from_result(&ticker, expiration, result)?;
        debug!(
            "Parsed {} puts and {} calls for {} {}",
            chain.puts.len(),
            chain.calls.len(),
            chain.ticker,
            chain.expiration
        );
        Ok(chain)
    }

    async fn fetch_expirations(&self, ticker: String) -> Result<Vec<NaiveDate>> {
        info!("Fetching Yahoo option expirations for {}", ticker);
        let listing = self.fetch_options(&ticker, None).await?;
        let mut dates: Vec<NaiveDate> = expiration_index(&listing).into_iter().map(|(d, _)| d).collect();
        dates.sort();
        Ok(dates)
    }
}

impl OptionChainProvider for YahooClient {
    fn get_option_chain(
        &self,
        ticker: &str,
        expiration: NaiveDate,
    ) -> impl Future<Output = Result<OptionChain>> + Send {
        self.fetch_chain(ticker.to_string(), expiration)
    }

    fn list_expirations(&self, ticker: &str) -> impl Future<Output = Result<Vec<NaiveDate>>> + Send {
        self.fetch_expirations(ticker.to_string())
    }
}
