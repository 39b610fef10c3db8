// src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs of one collar calculation, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParameters {
    pub ticker: String,
    pub entry_price: f64,
    pub shares: u32,
    pub put_strike: f64,
    pub call_strike: f64,
    pub expiration: NaiveDate,
}

/// One row of an option chain. The collar model only reads `strike`, `bid` and `ask`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionQuote {
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<f64>,
}

impl OptionQuote {
    pub fn new(strike: f64, bid: f64, ask: f64) -> Self {
        OptionQuote {
            strike,
            bid,
            ask,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub ticker: String,
    pub expiration: NaiveDate,
    pub puts: Vec<OptionQuote>,
    pub calls: Vec<OptionQuote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLeg {
    Put,
    Call,
}

impl fmt::Display for OptionLeg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionLeg::Put => write!(f, "put"),
            OptionLeg::Call => write!(f, "call"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffPoint {
    pub price: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollarResult {
    pub net_premium: f64,
    pub max_gain: f64,
    pub max_loss: f64,
    pub breakeven_low: f64,
    pub breakeven_high: f64,
    pub payoff_curve: Vec<PayoffPoint>,
}
