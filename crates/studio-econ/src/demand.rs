//! Quadratic demand model behind the pricing simulator card.
//!
//! Demand falls off with the squared relative distance from a baseline
//! price: `base * max(0, 1 - ((p - p0) / p0)^2 * sensitivity)`. Unlike the
//! willingness curve it is symmetric around the baseline.

use crate::{percent_of, round_units};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandModel {
    /// Units sold at the baseline price.
    pub base_demand: u64,
    pub baseline_price: Decimal,
    /// Higher is more price sensitive.
    pub sensitivity: Decimal,
    /// Unit cost used for the margin readout.
    pub cogs: Decimal,
}

impl Default for DemandModel {
    fn default() -> Self {
        Self {
            base_demand: 1000,
            baseline_price: Decimal::new(99, 0),
            sensitivity: Decimal::new(14, 1),
            cogs: Decimal::new(40, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub price: Decimal,
    pub demand: u64,
}

impl DemandModel {
    /// Units demanded at `price`. A zero baseline price yields the base demand.
    pub fn demand_at(&self, price: Decimal) -> u64 {
        let rel = (price - self.baseline_price)
            .checked_div(self.baseline_price)
            .unwrap_or(Decimal::ZERO);
        let factor = rel
            .checked_mul(rel)
            .and_then(|sq| sq.checked_mul(self.sensitivity))
            .map(|drop| (Decimal::ONE - drop).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO);
        round_units(Decimal::from(self.base_demand) * factor)
    }

    /// Demand sampled from `min` to `max` inclusive every `step`.
    ///
    /// A non-positive step samples `min` only.
    pub fn curve(&self, min: Decimal, max: Decimal, step: Decimal) -> Vec<DemandPoint> {
        let mut out = Vec::new();
        let mut p = min;
        while p <= max {
            out.push(DemandPoint {
                price: p,
                demand: self.demand_at(p),
            });
            if step <= Decimal::ZERO {
                break;
            }
            p += step;
        }
        out
    }

    /// The simulator's chart: 79 to 179 in steps of 5.
    pub fn default_curve(&self) -> Vec<DemandPoint> {
        self.curve(Decimal::new(79, 0), Decimal::new(179, 0), Decimal::new(5, 0))
    }

    /// Gross margin at `price` over unit cost, in percent.
    pub fn margin_pct(&self, price: Decimal) -> Decimal {
        percent_of(price - self.cogs, price)
    }
}

/// Gross margin points gained by realising `uplift` more per unit at
/// constant demand, for the investor note.
pub fn price_realization_uplift_pts(price: Decimal, uplift: Decimal) -> Decimal {
    percent_of(uplift, price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn demand_peaks_at_baseline() {
        let m = DemandModel::default();
        assert_eq!(m.demand_at(d(99)), 1000);
        assert_eq!(m.demand_at(d(79)), 943);
        assert_eq!(m.demand_at(d(119)), 943);
        assert_eq!(m.demand_at(d(139)), 771);
        assert_eq!(m.demand_at(d(179)), 86);
    }

    #[test]
    fn demand_floors_at_zero() {
        assert_eq!(DemandModel::default().demand_at(d(400)), 0);
    }

    #[test]
    fn default_curve_has_21_points() {
        let c = DemandModel::default().default_curve();
        assert_eq!(c.len(), 21);
        assert_eq!(c[0].price, d(79));
        assert_eq!(c[20].price, d(179));
        assert_eq!(c[4].demand, 1000);
    }

    #[test]
    fn zero_step_samples_once() {
        let c = DemandModel::default().curve(d(79), d(179), Decimal::ZERO);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn zero_baseline_does_not_panic() {
        let m = DemandModel {
            baseline_price: Decimal::ZERO,
            ..DemandModel::default()
        };
        assert_eq!(m.demand_at(d(50)), 1000);
    }

    #[test]
    fn margin_and_uplift() {
        let m = DemandModel::default();
        assert_eq!(m.margin_pct(d(99)), Decimal::new(5960, 2));
        assert_eq!(m.margin_pct(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(price_realization_uplift_pts(d(99), d(5)), Decimal::new(505, 2));
    }

    proptest! {
        #[test]
        fn demand_never_exceeds_base(cents in 0i64..100_000) {
            let m = DemandModel::default();
            prop_assert!(m.demand_at(Decimal::new(cents, 2)) <= m.base_demand);
        }

        #[test]
        fn demand_falls_above_baseline(cents in 9_900i64..30_000) {
            let m = DemandModel::default();
            let lo = m.demand_at(Decimal::new(cents, 2));
            let hi = m.demand_at(Decimal::new(cents + 100, 2));
            prop_assert!(hi <= lo);
        }
    }
}
