//! Multi-pack and subscription economics.
//!
//! [`bundle_contribution`] and [`subscription_contribution`] feed the studio
//! scenario; [`PackModel`] backs the standalone pack builder card, which uses
//! its own list-price assumptions.

use crate::{percent_of, round_currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_core::{CostAssumptions, PackContribution};

/// Per-bag contribution of a direct multi-pack of `qty` bags sold for
/// `bundle_price` in total. One order's fulfillment is shared across the pack.
///
/// `qty` of zero is treated as a single bag.
pub fn bundle_contribution(
    bundle_price: Decimal,
    qty: u32,
    costs: &CostAssumptions,
) -> PackContribution {
    let qty = Decimal::from(qty.max(1));
    let shipping = round_currency(costs.direct_fulfillment / qty);
    let unit_price = round_currency(bundle_price / qty);
    let payment_fee = round_currency(unit_price * costs.payment_fee_pct);
    PackContribution {
        unit_price,
        shipping,
        payment_fee,
        contribution: round_currency(unit_price - payment_fee - shipping - costs.landed_cogs()),
    }
}

/// Per-bag contribution of a subscription delivery: shelf price less
/// `discount_pct` percent, with batched shipping.
pub fn subscription_contribution(
    price: Decimal,
    discount_pct: Decimal,
    costs: &CostAssumptions,
) -> PackContribution {
    let unit_price =
        round_currency(price * (Decimal::ONE - discount_pct / Decimal::ONE_HUNDRED));
    let shipping = round_currency(
        costs.direct_fulfillment * (Decimal::ONE - costs.subscription_shipping_saving_pct),
    );
    let payment_fee = round_currency(unit_price * costs.payment_fee_pct);
    PackContribution {
        unit_price,
        shipping,
        payment_fee,
        contribution: round_currency(unit_price - payment_fee - shipping - costs.landed_cogs()),
    }
}

/// List-price assumptions for the pack builder card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackModel {
    pub unit_price: Decimal,
    pub cogs: Decimal,
    /// Fulfillment charged once per order.
    pub fulfillment_base: Decimal,
    /// Fulfillment charged per bag in the order.
    pub fulfillment_per_unit: Decimal,
    pub subscription_discount_pct: Decimal,
    /// Pack size from which per-bag fulfillment gets cheaper.
    pub bulk_threshold: u32,
    pub bulk_efficiency_pct: Decimal,
    /// Retention uplift credited to subscribers, in percent.
    pub retention_lift_pct: Decimal,
}

impl Default for PackModel {
    fn default() -> Self {
        Self {
            unit_price: Decimal::new(99, 0),
            cogs: Decimal::new(40, 0),
            fulfillment_base: Decimal::new(20, 0),
            fulfillment_per_unit: Decimal::new(5, 0),
            subscription_discount_pct: Decimal::TEN,
            bulk_threshold: 6,
            bulk_efficiency_pct: Decimal::TEN,
            retention_lift_pct: Decimal::new(18, 0),
        }
    }
}

/// Pack builder output for one pack size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackQuote {
    pub pack_size: u32,
    pub subscribed: bool,
    pub pack_price: Decimal,
    pub fulfillment_cost: Decimal,
    pub cogs_total: Decimal,
    /// Gross margin over pack price; zero for a free pack.
    pub gross_margin_pct: Decimal,
    pub retention_lift_pct: Decimal,
}

impl PackModel {
    /// Pack sizes offered on the card.
    pub const PACK_SIZES: [u32; 3] = [3, 6, 12];

    pub fn quote(&self, pack_size: u32, subscribe: bool) -> PackQuote {
        let n = Decimal::from(pack_size);
        let discount = if subscribe {
            Decimal::ONE - self.subscription_discount_pct / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE
        };
        let efficiency = if pack_size >= self.bulk_threshold {
            Decimal::ONE - self.bulk_efficiency_pct / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE
        };
        let pack_price = round_currency(self.unit_price * n * discount);
        let fulfillment_cost =
            round_currency(self.fulfillment_base + self.fulfillment_per_unit * n * efficiency);
        let cogs_total = round_currency(self.cogs * n);
        PackQuote {
            pack_size,
            subscribed: subscribe,
            pack_price,
            fulfillment_cost,
            cogs_total,
            gross_margin_pct: percent_of(pack_price - cogs_total - fulfillment_cost, pack_price),
            retention_lift_pct: if subscribe {
                self.retention_lift_pct
            } else {
                Decimal::ZERO
            },
        }
    }

    /// Quotes for every offered size, in [`PackModel::PACK_SIZES`] order.
    pub fn quotes(&self, subscribe: bool) -> Vec<PackQuote> {
        Self::PACK_SIZES
            .iter()
            .map(|&size| self.quote(size, subscribe))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64, scale: u32) -> Decimal {
        Decimal::new(v, scale)
    }

    #[test]
    fn default_bundle_of_three() {
        let b = bundle_contribution(d(349, 0), 3, &CostAssumptions::default());
        assert_eq!(b.shipping, d(1500, 2));
        assert_eq!(b.unit_price, d(11633, 2));
        assert_eq!(b.payment_fee, d(349, 2));
        assert_eq!(b.contribution, d(5784, 2));
    }

    #[test]
    fn zero_qty_is_single_bag() {
        let zero = bundle_contribution(d(139, 0), 0, &CostAssumptions::default());
        let one = bundle_contribution(d(139, 0), 1, &CostAssumptions::default());
        assert_eq!(zero, one);
        assert_eq!(one.shipping, d(45, 0));
    }

    #[test]
    fn default_subscription() {
        let s = subscription_contribution(d(139, 0), d(10, 0), &CostAssumptions::default());
        assert_eq!(s.unit_price, d(12510, 2));
        assert_eq!(s.shipping, d(3600, 2));
        assert_eq!(s.payment_fee, d(375, 2));
        assert_eq!(s.contribution, d(4535, 2));
    }

    #[test]
    fn pack_builder_quotes() {
        let m = PackModel::default();
        let q = m.quote(3, true);
        assert_eq!(q.pack_price, d(26730, 2));
        assert_eq!(q.fulfillment_cost, d(35, 0));
        assert_eq!(q.cogs_total, d(120, 0));
        assert_eq!(q.gross_margin_pct, d(4201, 2));
        assert_eq!(q.retention_lift_pct, d(18, 0));

        let q = m.quote(6, false);
        assert_eq!(q.pack_price, d(594, 0));
        assert_eq!(q.fulfillment_cost, d(47, 0));
        assert_eq!(q.gross_margin_pct, d(5168, 2));
        assert_eq!(q.retention_lift_pct, Decimal::ZERO);

        let q = m.quote(12, true);
        assert_eq!(q.pack_price, d(106920, 2));
        assert_eq!(q.fulfillment_cost, d(74, 0));
        assert_eq!(q.gross_margin_pct, d(4819, 2));
    }

    #[test]
    fn quotes_follow_offered_sizes() {
        let sizes: Vec<u32> = PackModel::default()
            .quotes(false)
            .iter()
            .map(|q| q.pack_size)
            .collect();
        assert_eq!(sizes, vec![3, 6, 12]);
    }

    #[test]
    fn empty_pack_has_zero_margin() {
        let q = PackModel::default().quote(0, false);
        assert_eq!(q.pack_price, Decimal::ZERO);
        assert_eq!(q.gross_margin_pct, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn bigger_bundles_ship_cheaper_per_bag(qty in 1u32..50) {
            let c = CostAssumptions::default();
            let small = bundle_contribution(d(349, 0), qty, &c);
            let big = bundle_contribution(d(349, 0), qty + 1, &c);
            prop_assert!(big.shipping <= small.shipping);
        }

        #[test]
        fn deeper_discount_lowers_subscription_contribution(pct in 0i64..99) {
            let c = CostAssumptions::default();
            let a = subscription_contribution(d(139, 0), d(pct, 0), &c);
            let b = subscription_contribution(d(139, 0), d(pct + 1, 0), &c);
            prop_assert!(b.contribution < a.contribution);
        }
    }
}
