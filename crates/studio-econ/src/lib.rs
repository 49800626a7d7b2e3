#![deny(warnings)]

//! Pricing and channel economics for Verde Studio.
//!
//! Every function here is pure and total: degenerate denominators fall back
//! to documented values instead of panicking or producing non-finite numbers.
//! Monetary results are rounded with [`round_currency`] at the same steps the
//! dashboard displays them, so repeated runs give identical cents.
//!
//! - [`wtp`]: willingness-to-pay interpolation
//! - [`channel`]: direct and wholesale unit contribution
//! - [`breakeven`]: volume split, blended contribution and break-even units
//! - [`bundle`]: multi-pack, subscription and pack-builder economics
//! - [`demand`]: quadratic demand curve for the pricing simulator
//! - [`mix`]: list-price channel mix optimizer
//! - [`benchmark`]: price-per-100g competitive positioning
//! - [`scenario`]: all of the above for one [`studio_core::ScenarioInputs`]

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub mod benchmark;
pub mod breakeven;
pub mod bundle;
pub mod channel;
pub mod demand;
pub mod mix;
pub mod scenario;
pub mod wtp;

pub use breakeven::{blend, break_even, split_volume, BREAK_EVEN_EPSILON};
pub use channel::{unit_contribution, wholesale_invoice_price};
pub use scenario::evaluate;
pub use wtp::{fraction_willing_to_pay, WillingnessCurve};

/// Round a monetary value to cents, midpoint away from zero.
///
/// Example:
/// assert_eq!(round_currency(Decimal::new(57625, 3)), Decimal::new(5763, 2));
pub fn round_currency(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole unit count, midpoint away from zero. Negative values
/// count as zero and values beyond `u64` saturate.
pub fn round_units(x: Decimal) -> u64 {
    let r = x.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if r <= Decimal::ZERO {
        return 0;
    }
    r.to_u64().unwrap_or(u64::MAX)
}

/// `a * b`, saturating at [`Decimal::MAX`] or [`Decimal::MIN`] on overflow.
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        if a.is_sign_negative() == b.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `100 * part / whole`, rounded to cents. Zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(whole))
        .map(round_currency)
        .unwrap_or(Decimal::ZERO)
}
