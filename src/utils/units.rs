//! Fixed-point token quantities with 18 fractional decimal digits.

/// A token quantity expressed in base units (`10^-18` of a whole token).
pub type Amount = u128;

/// Number of fractional decimal digits carried by every token.
pub const DECIMALS: u8 = 18;

/// Base units in one whole token.
pub const ONE_TOKEN: Amount = 1_000_000_000_000_000_000;

/// Convert a whole-token quantity into base units.
///
/// Returns `None` when the result does not fit in an [`Amount`].
pub fn to_base_units(whole: u128) -> Option<Amount> {
    whole.checked_mul(ONE_TOKEN)
}

/// Render a base-unit quantity as a decimal string of whole tokens.
///
/// Trailing zeros of the fractional part are dropped, and a whole number
/// renders with a single `.0` (e.g. `1.0`, `0.1`, `999990.0`).
pub fn format_units(amount: Amount) -> String {
    let whole = amount / ONE_TOKEN;
    let fraction = amount % ONE_TOKEN;
    if fraction == 0 {
        return format!("{whole}.0");
    }
    let digits = format!("{:0width$}", fraction, width = DECIMALS as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
