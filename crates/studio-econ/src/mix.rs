//! Channel mix optimizer card: two fixed list prices blended by a slider.

use crate::breakeven::break_even;
use crate::{percent_of, round_currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_core::BreakEven;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixModel {
    pub direct_price: Decimal,
    pub wholesale_price: Decimal,
    pub cogs: Decimal,
    pub direct_shipping: Decimal,
    pub wholesale_shipping: Decimal,
    pub fixed_monthly: Decimal,
}

impl Default for MixModel {
    fn default() -> Self {
        Self {
            direct_price: Decimal::new(99, 0),
            wholesale_price: Decimal::new(69, 0),
            cogs: Decimal::new(40, 0),
            direct_shipping: Decimal::new(15, 0),
            wholesale_shipping: Decimal::new(5, 0),
            fixed_monthly: Decimal::new(100_000, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixOutcome {
    pub direct_pct: u8,
    pub direct_margin_pct: Decimal,
    pub wholesale_margin_pct: Decimal,
    pub blended_margin_pct: Decimal,
    pub contribution_per_unit: Decimal,
    pub break_even: BreakEven,
}

/// Unrounded `margin / price`; zero at a zero price.
fn margin_ratio(margin: Decimal, price: Decimal) -> Decimal {
    margin.checked_div(price).unwrap_or(Decimal::ZERO)
}

impl MixModel {
    pub fn direct_unit_margin(&self) -> Decimal {
        self.direct_price - self.cogs - self.direct_shipping
    }

    pub fn wholesale_unit_margin(&self) -> Decimal {
        self.wholesale_price - self.cogs - self.wholesale_shipping
    }

    /// Evaluate the card at `direct_pct` percent direct (clamped to 100).
    pub fn evaluate(&self, direct_pct: u8) -> MixOutcome {
        let direct_pct = direct_pct.min(100);
        let d_share = Decimal::from(direct_pct) / Decimal::ONE_HUNDRED;
        let w_share = Decimal::ONE - d_share;

        let direct_ratio = margin_ratio(self.direct_unit_margin(), self.direct_price);
        let wholesale_ratio = margin_ratio(self.wholesale_unit_margin(), self.wholesale_price);
        let blended_margin_pct = round_currency(
            (direct_ratio * d_share + wholesale_ratio * w_share) * Decimal::ONE_HUNDRED,
        );
        let contribution_per_unit = round_currency(
            self.direct_unit_margin() * d_share + self.wholesale_unit_margin() * w_share,
        );

        MixOutcome {
            direct_pct,
            direct_margin_pct: percent_of(self.direct_unit_margin(), self.direct_price),
            wholesale_margin_pct: percent_of(self.wholesale_unit_margin(), self.wholesale_price),
            blended_margin_pct,
            contribution_per_unit,
            break_even: break_even(self.fixed_monthly, contribution_per_unit),
        }
    }
}
