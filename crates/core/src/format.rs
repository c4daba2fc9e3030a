//! Display formatting for inventory tables.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a price as US dollars with thousands separators and two decimals,
/// e.g. `25000` becomes `$25,000.00`.
pub fn format_price(price: Decimal) -> String {
    let mut amount = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = amount.is_sign_negative() && !amount.is_zero();
    amount = amount.abs();
    amount.rescale(2);

    let text = amount.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("${sign}{}.{cents}", group_thousands(whole))
}

/// Label shown in the stock column.
pub fn stock_label(in_stock: bool) -> &'static str {
    if in_stock { "Yes" } else { "No" }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
