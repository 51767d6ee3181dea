use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const TEN: u128 = 10;

/// Formats a duration as seconds with `decimals` fractional digits, rounding
/// half up.
pub(crate) fn format_secs(value: Duration, decimals: u32) -> String {
    let scale = TEN.saturating_pow(decimals);
    let unit_ns = NANOS_PER_SEC.checked_div(scale).unwrap_or(1).max(1);
    let units = value
        .as_nanos()
        .saturating_add(unit_ns / 2)
        .checked_div(unit_ns)
        .unwrap_or(0);
    format_scaled(units, decimals)
}

/// Formats a fixed-point value carrying `decimals` fractional digits.
pub(crate) fn format_scaled(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = TEN.saturating_pow(decimals);
    let whole = value.checked_div(scale).unwrap_or(0);
    let fraction = value.checked_rem(scale).unwrap_or(0);
    let width = usize::try_from(decimals).unwrap_or(0);
    format!("{whole}.{fraction:0width$}")
}
