// src/services/collar.rs
use log::debug;

use crate::models::{CollarResult, OptionQuote, PayoffPoint, StrategyParameters};

/// Number of samples on the payoff curve.
pub const CURVE_POINTS: usize = 100;
/// Distance below the put strike and above the call strike covered by the curve.
pub const CURVE_MARGIN: f64 = 20.0;

/// Evenly spaced samples over the closed interval `[start, stop]`.
/// The last sample is `stop` exactly, whatever the rounding of the step.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// Sample prices for the payoff curve of a collar with the given strikes.
pub fn price_grid(put_strike: f64, call_strike: f64) -> Vec<f64> {
    linspace(put_strike - CURVE_MARGIN, call_strike + CURVE_MARGIN, CURVE_POINTS)
}

/// Net profit of the whole position if the stock settles at `price`.
pub fn payoff_at(params: &StrategyParameters, net_premium: f64, price: f64) -> f64 {
    let intrinsic_put = (params.put_strike - price).max(0.0);
    let intrinsic_call = (price - params.call_strike).max(0.0);
    (price - params.entry_price - intrinsic_put + intrinsic_call + net_premium) * params.shares as f64
}

/// Breakeven bounds. A zero net premium leaves both bounds on the strikes.
fn breakevens(params: &StrategyParameters, net_premium: f64) -> (f64, f64) {
    let low = if net_premium < 0.0 {
        params.entry_price + net_premium
    } else {
        params.put_strike
    };
    let high = if net_premium > 0.0 {
        params.entry_price + net_premium
    } else {
        params.call_strike
    };
    (low, high)
}

/// Prices the collar. The caller is responsible for passing the quotes whose
/// strikes match `params.put_strike` and `params.call_strike`.
pub fn compute_collar(
    params: &StrategyParameters,
    put_quote: &OptionQuote,
    call_quote: &OptionQuote,
) -> CollarResult {
    // Buying protection pays the ask, writing the call receives the bid.
    let put_premium = put_quote.ask;
    let call_premium = call_quote.bid;
    let net_premium = call_premium - put_premium;

    let shares = params.shares as f64;
    let max_loss = (params.put_strike - params.entry_price + net_premium) * shares;
    let max_gain = (params.call_strike - params.entry_price + net_premium) * shares;
    let (breakeven_low, breakeven_high) = breakevens(params, net_premium);

    let payoff_curve = price_grid(params.put_strike, params.call_strike)
        .into_iter()
        .map(|price| PayoffPoint {
            price,
            net_profit: payoff_at(params, net_premium, price),
        })
        .collect();

    debug!(
        "Collar for {}: net premium {}, max gain {}, max loss {}, breakeven {}..{}",
        params.ticker, net_premium, max_gain, max_loss, breakeven_low, breakeven_high
    );

    CollarResult {
        net_premium,
        max_gain,
        max_loss,
        breakeven_low,
        breakeven_high,
        payoff_curve,
    }
}
