// src/handlers/collar.rs
use chrono::NaiveDate;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{CollarResult, StrategyParameters};
use crate::services::chart::{payoff_chart, ChartSpec};
use crate::services::collar::compute_collar;
use crate::services::error::{CollarError, Result};
use crate::services::format::CollarSummary;
use crate::services::provider::{fetch_collar_quotes, OptionChainProvider};

/// Raw calculator inputs as submitted by the form. Missing fields take the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollarForm {
    pub ticker: String,
    pub entry_price: f64,
    pub shares: i64,
    pub put_strike: f64,
    pub call_strike: f64,
    pub expiration: String,
}

impl Default for CollarForm {
    fn default() -> Self {
        CollarForm {
            ticker: "AAPL".to_string(),
            entry_price: 160.0,
            shares: 100,
            put_strike: 150.0,
            call_strike: 175.0,
            expiration: "2025-12-20".to_string(),
        }
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    // Written so that NaN fails too.
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(CollarError::InvalidInput(format!(
            "{} must be at least 0, got {}",
            name, value
        )))
    }
}

impl CollarForm {
    /// Applies the per-field floors. Strike ordering is deliberately left unchecked.
    pub fn validate(&self) -> Result<StrategyParameters> {
        let ticker = self.ticker.trim();
        if ticker.is_empty() {
            return Err(CollarError::InvalidInput("ticker must not be empty".into()));
        }

        let shares = u32::try_from(self.shares)
            .ok()
            .filter(|&s| s >= 1)
            .ok_or_else(|| {
                CollarError::InvalidInput(format!("shares must be at least 1, got {}", self.shares))
            })?;

        let expiration = NaiveDate::parse_from_str(self.expiration.trim(), "%Y-%m-%d").map_err(|_| {
            CollarError::InvalidInput(format!(
                "expiration must be a YYYY-MM-DD date, got {:?}",
                self.expiration
            ))
        })?;

        Ok(StrategyParameters {
            ticker: ticker.to_uppercase(),
            entry_price: non_negative("entry_price", self.entry_price)?,
            shares,
            put_strike: non_negative("put_strike", self.put_strike)?,
            call_strike: non_negative("call_strike", self.call_strike)?,
            expiration,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CollarResponse {
    pub params: StrategyParameters,
    pub result: CollarResult,
    pub summary: CollarSummary,
    pub chart: ChartSpec,
}

/// Validate, fetch, look up, compute. Any failure aborts the whole calculation.
pub async fn run_calculation<P>(provider: &P, form: &CollarForm) -> Result<CollarResponse>
where
    P: OptionChainProvider,
{
    let params = form.validate()?;
    let (put_quote, call_quote) = fetch_collar_quotes(provider, &params).await?;
    let result = compute_collar(&params, &put_quote, &call_quote);
    let summary = CollarSummary::from_result(&result);
    let chart = payoff_chart(&params, &result);

    Ok(CollarResponse {
        params,
        result,
        summary,
        chart,
    })
}

pub async fn calculate_collar<P>(form: CollarForm, provider: Arc<P>) -> std::result::Result<Json, Rejection>
where
    P: OptionChainProvider + Send + Sync + 'static,
{
    info!("Handling collar calculation for {:?}", form.ticker);

    match run_calculation(provider.as_ref(), &form).await {
        Ok(response) => {
            info!(
                "Collar computed for {}: {}",
                response.params.ticker, response.summary.net_premium
            );
            Ok(warp::reply::json(&response))
        }
        Err(e) => {
            error!("Collar calculation failed: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}

pub async fn get_expirations<P>(ticker: String, provider: Arc<P>) -> std::result::Result<Json, Rejection>
where
    P: OptionChainProvider + Send + Sync + 'static,
{
    info!("Handling request to list expirations for {}", ticker);

    let dates = provider.list_expirations(&ticker).await.map_err(|e| {
        error!("Failed to list expirations for {}: {}", ticker, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let dates: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    Ok(warp::reply::json(&dates))
}

pub async fn get_defaults() -> std::result::Result<Json, Rejection> {
    Ok(warp::reply::json(&CollarForm::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionLeg;
    use crate::services::provider::stub::{aapl_chain, StubProvider};

    #[test]
    fn defaults_validate() {
        let params = CollarForm::default().validate().unwrap();
        assert_eq!(params.ticker, "AAPL");
        assert_eq!(params.shares, 100);
        assert_eq!(params.expiration, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap());
    }

    #[test]
    fn floors_are_enforced() {
        let cases = [
            CollarForm { entry_price: -0.5, ..Default::default() },
            CollarForm { shares: 0, ..Default::default() },
            CollarForm { shares: -10, ..Default::default() },
            CollarForm { put_strike: -1.0, ..Default::default() },
            CollarForm { call_strike: f64::NAN, ..Default::default() },
            CollarForm { ticker: "   ".into(), ..Default::default() },
            CollarForm { expiration: "12/20/2025".into(), ..Default::default() },
            CollarForm { expiration: "2025-02-30".into(), ..Default::default() },
        ];
        for form in cases {
            let err = form.validate().unwrap_err();
            assert_eq!(err.kind(), "invalid_input", "{:?} should be rejected", form);
        }
    }

    #[test]
    fn zero_values_and_inverted_strikes_are_accepted() {
        let form = CollarForm {
            entry_price: 0.0,
            put_strike: 200.0,
            call_strike: 0.0,
            ticker: " msft ".into(),
            ..Default::default()
        };
        let params = form.validate().unwrap();
        assert_eq!(params.ticker, "MSFT");
        assert_eq!((params.put_strike, params.call_strike), (200.0, 0.0));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let form: CollarForm = serde_json::from_str(r#"{"ticker": "TSLA", "shares": 50}"#).unwrap();
        assert_eq!(form.ticker, "TSLA");
        assert_eq!(form.shares, 50);
        assert_eq!(form.entry_price, 160.0);
    }

    #[tokio::test]
    async fn calculation_runs_end_to_end() {
        let provider = StubProvider::with_chain(aapl_chain());
        let response = run_calculation(&provider, &CollarForm::default()).await.unwrap();

        assert_eq!(response.summary.net_premium, "Net Premium (Credit/Debit): $-1.00");
        assert_eq!(response.summary.breakeven_range, "Breakeven Range: $159.00 to $175.00");
        assert_eq!(response.result.payoff_curve.len(), 100);
        assert_eq!(response.chart.series[0].points.len(), 100);
    }

    #[tokio::test]
    async fn unlisted_strike_yields_no_result() {
        let provider = StubProvider::with_chain(aapl_chain());
        let form = CollarForm { put_strike: 151.0, ..Default::default() };
        let err = run_calculation(&provider, &form).await.unwrap_err();
        assert_eq!(err, CollarError::LookupNotFound { leg: OptionLeg::Put, strike: 151.0 });
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_provider() {
        let provider = StubProvider::failing(CollarError::DataProvider("should not be called".into()));
        let form = CollarForm { shares: 0, ..Default::default() };
        let err = run_calculation(&provider, &form).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }
}
