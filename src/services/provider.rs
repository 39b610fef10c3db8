// src/services/provider.rs
use chrono::NaiveDate;
use log::{error, info};
use std::future::Future;

use crate::models::{OptionChain, OptionLeg, OptionQuote, StrategyParameters};
use crate::services::error::{CollarError, Result};

/// Source of option chains. Implemented by the Yahoo client and by test stubs.
pub trait OptionChainProvider {
    /// Puts and calls listed for `ticker` at `expiration`.
    fn get_option_chain(
        &self,
        ticker: &str,
        expiration: NaiveDate,
    ) -> impl Future<Output = Result<OptionChain>> + Send;

    /// Expirations currently listed for `ticker`, earliest first.
    fn list_expirations(&self, ticker: &str) -> impl Future<Output = Result<Vec<NaiveDate>>> + Send;
}

/// First row whose strike equals `strike` exactly. No tolerance, no interpolation.
pub fn find_quote<'a>(rows: &'a [OptionQuote], leg: OptionLeg, strike: f64) -> Result<&'a OptionQuote> {
    rows.iter()
        .find(|row| row.strike == strike)
        .ok_or(CollarError::LookupNotFound { leg, strike })
}

/// Put and call rows for the requested strikes, or the first failure.
pub fn select_collar_quotes(
    chain: &OptionChain,
    params: &StrategyParameters,
) -> Result<(OptionQuote, OptionQuote)> {
    let put = find_quote(&chain.puts, OptionLeg::Put, params.put_strike)?;
    let call = find_quote(&chain.calls, OptionLeg::Call, params.call_strike)?;
    Ok((put.clone(), call.clone()))
}

/// Fetches the chain for `params` and picks out the two collar legs.
pub async fn fetch_collar_quotes<P>(
    provider: &P,
    params: &StrategyParameters,
) -> Result<(OptionQuote, OptionQuote)>
where
    P: OptionChainProvider,
{
    info!(
        "Fetching option chain for {} expiring {}",
        params.ticker, params.expiration
    );
    let chain = provider
        .get_option_chain(&params.ticker, params.expiration)
        .await?;

    select_collar_quotes(&chain, params).map_err(|e| {
        error!("Strike lookup failed for {}: {}", params.ticker, e);
        e
    })
}
