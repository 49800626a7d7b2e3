//! Channel volume split, blended contribution and break-even units.

use crate::{percent_of, round_currency, round_units};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use studio_core::{Blend, BreakEven, ChannelContribution};
use tracing::debug;

/// Floor applied to the per-unit contribution before dividing fixed cost.
pub const BREAK_EVEN_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Split yearly volume by the direct share, `direct_pct` clamped to 100.
///
/// Returns `(direct_units, wholesale_units)`; the two always sum to `volume`.
pub fn split_volume(volume: u64, direct_pct: u8) -> (u64, u64) {
    let share = Decimal::from(direct_pct.min(100)) / Decimal::ONE_HUNDRED;
    let direct = round_units(Decimal::from(volume) * share).min(volume);
    (direct, volume - direct)
}

/// Volume-weighted contribution per bag.
///
/// The denominator is floored at one unit, so zero volume yields the
/// numerator (zero) rather than a division error. When the unit-weighted
/// sum overflows, the average is taken over volume shares instead.
pub fn blend(
    direct: &ChannelContribution,
    wholesale: &ChannelContribution,
    direct_units: u64,
    wholesale_units: u64,
    price: Decimal,
) -> Blend {
    let total = direct_units.saturating_add(wholesale_units).max(1);
    let total = Decimal::from(total);
    let direct_units = Decimal::from(direct_units);
    let wholesale_units = Decimal::from(wholesale_units);
    let average = direct
        .contribution
        .checked_mul(direct_units)
        .zip(wholesale.contribution.checked_mul(wholesale_units))
        .and_then(|(d, w)| d.checked_add(w))
        .and_then(|sum| sum.checked_div(total))
        .or_else(|| {
            let d_share = direct_units / total;
            let w_share = wholesale_units / total;
            direct
                .contribution
                .checked_mul(d_share)
                .zip(wholesale.contribution.checked_mul(w_share))
                .and_then(|(d, w)| d.checked_add(w))
        })
        .unwrap_or_else(|| direct.contribution.max(wholesale.contribution));
    let per_unit = round_currency(average);
    Blend {
        per_unit,
        pct: percent_of(per_unit, price),
    }
}

/// Bags per month needed to cover `fixed_monthly_cost` at `per_unit` each.
///
/// A non-positive contribution is floored at [`BREAK_EVEN_EPSILON`] and
/// flagged as unreachable; the count is then only a huge upper bound.
///
/// Example:
/// let be = break_even(Decimal::new(250_000, 0), Decimal::new(4983, 2));
/// assert_eq!(be.units_per_month, 5018);
pub fn break_even(fixed_monthly_cost: Decimal, per_unit: Decimal) -> BreakEven {
    if fixed_monthly_cost <= Decimal::ZERO {
        return BreakEven {
            units_per_month: 0,
            units_per_year: 0,
            reachable: true,
        };
    }
    let floor = per_unit.max(BREAK_EVEN_EPSILON);
    let units_per_month = fixed_monthly_cost
        .checked_div(floor)
        .and_then(|u| u.ceil().to_u64())
        .unwrap_or(u64::MAX);
    let reachable = per_unit > Decimal::ZERO;
    if !reachable {
        debug!(%per_unit, units_per_month, "break-even unreachable at non-positive contribution");
    }
    BreakEven {
        units_per_month,
        units_per_year: units_per_month.saturating_mul(12),
        reachable,
    }
}
