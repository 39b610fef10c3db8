// src/services/chart.rs
use serde::Serialize;

use crate::models::{CollarResult, PayoffPoint, StrategyParameters};

pub const CHART_TITLE: &str = "Equity Collar Payoff at Expiration";
pub const X_AXIS_LABEL: &str = "Stock Price at Expiration";
pub const Y_AXIS_LABEL: &str = "Net Profit / Loss ($)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub color: &'static str,
    pub dashed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub points: Vec<PayoffPoint>,
}

/// Everything a front end needs to draw the payoff chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub grid: bool,
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
}

pub fn payoff_chart(params: &StrategyParameters, result: &CollarResult) -> ChartSpec {
    ChartSpec {
        title: CHART_TITLE,
        x_label: X_AXIS_LABEL,
        y_label: Y_AXIS_LABEL,
        grid: true,
        series: vec![Series {
            label: "Payoff",
            points: result.payoff_curve.clone(),
        }],
        reference_lines: vec![
            ReferenceLine {
                orientation: Orientation::Horizontal,
                value: 0.0,
                color: "gray",
                dashed: true,
                label: None,
            },
            ReferenceLine {
                orientation: Orientation::Vertical,
                value: params.put_strike,
                color: "red",
                dashed: true,
                label: Some("Put Strike"),
            },
            ReferenceLine {
                orientation: Orientation::Vertical,
                value: params.call_strike,
                color: "green",
                dashed: true,
                label: Some("Call Strike"),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionQuote;
    use crate::services::collar::compute_collar;
    use chrono::NaiveDate;

    #[test]
    fn chart_carries_curve_and_reference_lines() {
        let params = StrategyParameters {
            ticker: "AAPL".into(),
            entry_price: 160.0,
            shares: 100,
            put_strike: 150.0,
            call_strike: 175.0,
            expiration: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
        };
        let result = compute_collar(
            &params,
            &OptionQuote::new(150.0, 2.8, 3.0),
            &OptionQuote::new(175.0, 2.0, 2.2),
        );
        let chart = payoff_chart(&params, &result);

        assert_eq!(chart.x_label, "Stock Price at Expiration");
        assert_eq!(chart.y_label, "Net Profit / Loss ($)");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points, result.payoff_curve);

        let values: Vec<(Orientation, f64)> = chart
            .reference_lines
            .iter()
            .map(|l| (l.orientation, l.value))
            .collect();
        assert_eq!(
            values,
            vec![
                (Orientation::Horizontal, 0.0),
                (Orientation::Vertical, 150.0),
                (Orientation::Vertical, 175.0),
            ]
        );
    }

    #[test]
    fn chart_serializes_with_lowercase_orientation() {
        let line = ReferenceLine {
            orientation: Orientation::Vertical,
            value: 150.0,
            color: "red",
            dashed: true,
            label: Some("Put Strike"),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["label"], "Put Strike");
    }
}
