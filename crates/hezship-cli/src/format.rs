//! Presentation helpers shared by the command handlers.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Format an amount as `KES 1,234.00`, or `FREE` for zero.
pub(crate) fn fmt_cost(amount: Decimal) -> String {
    if amount.is_zero() {
        "FREE".to_string()
    } else {
        fmt_kes(amount)
    }
}

/// Format an amount as `KES 1,234.00`.
pub(crate) fn fmt_kes(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("KES {sign}{grouped}.{fraction}")
}

/// Pretty-print any serialisable value to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
