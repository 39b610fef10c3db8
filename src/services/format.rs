// src/services/format.rs
use serde::Serialize;

use crate::models::CollarResult;

/// Two-decimal dollar amount. `grouped` inserts thousands separators.
/// The sign stays after the dollar sign: `$-1,100.00`.
pub fn format_currency(value: f64, grouped: bool) -> String {
    let fixed = format!("{:.2}", value);
    if !grouped {
        return format!("${}", fixed);
    }

    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped_int = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped_int.push(',');
        }
        grouped_int.push(c);
    }

    format!("${}{}.{}", sign, grouped_int, frac_part)
}

/// The four user-facing result lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollarSummary {
    pub net_premium: String,
    pub max_gain: String,
    pub max_loss: String,
    pub breakeven_range: String,
}

impl CollarSummary {
    pub fn from_result(result: &CollarResult) -> Self {
        CollarSummary {
            net_premium: format!(
                "Net Premium (Credit/Debit): {}",
                format_currency(result.net_premium, false)
            ),
            max_gain: format!("Max Gain: {}", format_currency(result.max_gain, true)),
            max_loss: format!("Max Loss: {}", format_currency(result.max_loss, true)),
            breakeven_range: format!(
                "Breakeven Range: {} to {}",
                format_currency(result.breakeven_low, false),
                format_currency(result.breakeven_high, false)
            ),
        }
    }

    pub fn lines(&self) -> [&str; 4] {
        [
            self.net_premium.as_str(),
            self.max_gain.as_str(),
            self.max_loss.as_str(),
            self.breakeven_range.as_str(),
        ]
    }
}
