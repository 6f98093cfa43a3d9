//! Token unit conversion.
//!
//! Contracts report balances as integers in the token's smallest unit.
//! API responses carry decimals.

use rust_decimal::Decimal;

/// Decimals used by the pool and reinsurance tokens.
pub const TOKEN_DECIMALS: u32 = 18;

/// Converts an integer amount in smallest units to a decimal amount.
///
/// Returns `None` when the amount does not fit a `Decimal` or `decimals`
/// exceeds the supported scale (28).
#[must_use]
pub fn from_smallest_unit(value: u128, decimals: u32) -> Option<Decimal> {
    let divisor = 10u128.checked_pow(decimals)?;
    let whole = i128::try_from(value / divisor).ok()?;
    let frac = i128::try_from(value % divisor).ok()?;

    let whole = Decimal::try_from_i128_with_scale(whole, 0).ok()?;
    let frac = Decimal::try_from_i128_with_scale(frac, decimals).ok()?;
    whole.checked_add(frac).map(|d| d.normalize())
}
