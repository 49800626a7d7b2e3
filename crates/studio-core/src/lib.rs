#![deny(warnings)]

//! Core domain models and invariants for Verde Studio.
//!
//! This crate defines the serializable value types shared by the pricing
//! engine, the advisor and the CLI, together with validation helpers used
//! when assumptions or scenarios come from a config file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;

/// One reference point on the willingness-to-pay curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WillingnessPoint {
    /// Shelf price per bag.
    pub price: Decimal,
    /// Fraction of target buyers willing to pay at least `price`, in [0,1].
    pub fraction_willing: Decimal,
}

impl WillingnessPoint {
    pub fn new(price: Decimal, fraction_willing: Decimal) -> Self {
        Self {
            price,
            fraction_willing,
        }
    }
}

/// Reference curve from the consumer survey: 79, 99, 139 and 179 per bag.
pub fn default_willingness_curve() -> Vec<WillingnessPoint> {
    vec![
        WillingnessPoint::new(Decimal::new(79, 0), Decimal::new(85, 2)),
        WillingnessPoint::new(Decimal::new(99, 0), Decimal::new(60, 2)),
        WillingnessPoint::new(Decimal::new(139, 0), Decimal::new(35, 2)),
        WillingnessPoint::new(Decimal::new(179, 0), Decimal::new(15, 2)),
    ]
}

/// Cost of goods per bag before logistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CogsBreakdown {
    /// Raw ingredients.
    pub raw: Decimal,
    /// Co-packer conversion fee.
    pub co_pack: Decimal,
    /// Pouch and label.
    pub packaging: Decimal,
}

impl CogsBreakdown {
    pub fn total(&self) -> Decimal {
        self.raw + self.co_pack + self.packaging
    }
}

impl Default for CogsBreakdown {
    fn default() -> Self {
        Self {
            raw: Decimal::new(22, 0),
            co_pack: Decimal::new(8, 0),
            packaging: Decimal::new(5, 0),
        }
    }
}

/// Fixed per-unit and per-order cost assumptions, supplied once at startup.
///
/// Percentages are fractions (`0.03` = 3%).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    pub cogs: CogsBreakdown,
    /// Inbound freight to the warehouse, per bag.
    pub inbound: Decimal,
    /// Secondary packing, per bag.
    pub secondary: Decimal,
    /// Last-mile fulfillment for one direct order, regardless of bag count.
    pub direct_fulfillment: Decimal,
    /// Freight to the retailer, per bag.
    pub wholesale_freight: Decimal,
    /// Payment processing fee on direct sales.
    pub payment_fee_pct: Decimal,
    /// Trade allowances deducted from the wholesale invoice.
    pub wholesale_allowances_pct: Decimal,
    /// Retailer margin taken off the shelf price to get the invoice price.
    pub retailer_margin_pct: Decimal,
    /// Shipping saved by batching subscription orders.
    pub subscription_shipping_saving_pct: Decimal,
}

impl CostAssumptions {
    /// COGS plus inbound and secondary handling: the cost of a bag on the shelf
    /// of our own warehouse.
    pub fn landed_cogs(&self) -> Decimal {
        self.cogs.total() + self.inbound + self.secondary
    }
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            cogs: CogsBreakdown::default(),
            inbound: Decimal::ONE,
            secondary: Decimal::new(4, 0),
            direct_fulfillment: Decimal::new(45, 0),
            wholesale_freight: Decimal::new(8, 0),
            payment_fee_pct: Decimal::new(3, 2),
            wholesale_allowances_pct: Decimal::new(4, 2),
            retailer_margin_pct: Decimal::new(15, 2),
            subscription_shipping_saving_pct: Decimal::new(20, 2),
        }
    }
}

/// A row of the competitive price benchmark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub name: String,
    /// Shelf price normalised to 100 g.
    pub price_per_100g: Decimal,
    pub note: String,
}

impl BenchmarkEntry {
    pub fn new(name: &str, price_per_100g: Decimal, note: &str) -> Self {
        Self {
            name: name.to_string(),
            price_per_100g,
            note: note.to_string(),
        }
    }
}

/// Competitive set tracked by the studio.
pub fn default_competitors() -> Vec<BenchmarkEntry> {
    vec![
        BenchmarkEntry::new("Comp-A", Decimal::new(843, 1), "Mass low-cost"),
        BenchmarkEntry::new("Comp-B", Decimal::new(89, 0), "Mass premium"),
        BenchmarkEntry::new("Comp-C", Decimal::new(139, 0), "Specialty"),
        BenchmarkEntry::new("Comp-D", Decimal::new(1761, 1), "Premium"),
    ]
}

/// Everything the engine treats as constant for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub costs: CostAssumptions,
    pub willingness: Vec<WillingnessPoint>,
    /// Net weight of one bag in grams.
    pub bag_grams: Decimal,
    pub competitors: Vec<BenchmarkEntry>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            costs: CostAssumptions::default(),
            willingness: default_willingness_curve(),
            bag_grams: Decimal::new(113, 0),
            competitors: default_competitors(),
        }
    }
}

/// Sales channel for a single bag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Sold on our own site and shipped to the consumer.
    Direct,
    /// Invoiced to a retailer.
    Wholesale,
}

/// Inputs the user controls with sliders and selects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInputs {
    /// Shelf price (MSRP) per bag.
    pub price: Decimal,
    /// Share of volume sold direct, 0..=100. The rest goes wholesale.
    pub direct_mix_pct: u8,
    /// Size of the addressable buyer population for year one.
    pub target_buyers: u64,
    pub fixed_monthly_cost: Decimal,
    /// Bags per multi-pack.
    pub bundle_qty: u32,
    /// Total price of one multi-pack.
    pub bundle_price: Decimal,
    /// Subscription discount as a percentage, 0..=100.
    pub subscription_discount_pct: Decimal,
}

impl ScenarioInputs {
    pub fn wholesale_mix_pct(&self) -> u8 {
        100u8.saturating_sub(self.direct_mix_pct.min(100))
    }

    /// Apply a single field update, as fired by one input control.
    pub fn apply(&mut self, change: InputChange) {
        match change {
            InputChange::Price(v) => self.price = v,
            InputChange::DirectMixPct(v) => self.direct_mix_pct = v,
            InputChange::TargetBuyers(v) => self.target_buyers = v,
            InputChange::FixedMonthlyCost(v) => self.fixed_monthly_cost = v,
            InputChange::BundleQty(v) => self.bundle_qty = v,
            InputChange::BundlePrice(v) => self.bundle_price = v,
            InputChange::SubscriptionDiscountPct(v) => self.subscription_discount_pct = v,
        }
    }

    /// Builder-style variant of [`ScenarioInputs::apply`].
    pub fn with(mut self, change: InputChange) -> Self {
        self.apply(change);
        self
    }
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            price: Decimal::new(139, 0),
            direct_mix_pct: 50,
            target_buyers: 50_000,
            fixed_monthly_cost: Decimal::new(250_000, 0),
            bundle_qty: 3,
            bundle_price: Decimal::new(349, 0),
            subscription_discount_pct: Decimal::new(10, 0),
        }
    }
}

/// A change to exactly one field of [`ScenarioInputs`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputChange {
    Price(Decimal),
    DirectMixPct(u8),
    TargetBuyers(u64),
    FixedMonthlyCost(Decimal),
    BundleQty(u32),
    BundlePrice(Decimal),
    SubscriptionDiscountPct(Decimal),
}

/// Net revenue per bag after channel-specific costs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelContribution {
    pub channel: Channel,
    pub contribution: Decimal,
    /// Contribution as a percentage of gross price (direct) or of net
    /// wholesale revenue (wholesale). Zero when that base is zero.
    pub contribution_pct: Decimal,
    /// Invoice price charged to the retailer; wholesale only.
    pub invoice_price: Option<Decimal>,
}

/// Volume-weighted contribution across both channels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blend {
    pub per_unit: Decimal,
    /// `per_unit` as a percentage of the shelf price.
    pub pct: Decimal,
}

/// Units needed to cover fixed monthly cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEven {
    pub units_per_month: u64,
    pub units_per_year: u64,
    /// False when the blended contribution is not positive, in which case the
    /// unit counts are only the epsilon-floor bound and never reachable.
    pub reachable: bool,
}

/// Per-bag economics of a multi-pack or a subscription delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackContribution {
    pub unit_price: Decimal,
    pub shipping: Decimal,
    pub payment_fee: Decimal,
    pub contribution: Decimal,
}

/// Every number derived from one [`ScenarioInputs`] snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub price: Decimal,
    pub fraction_willing: Decimal,
    pub volume_per_year: u64,
    pub revenue_per_year: Decimal,
    pub direct_units: u64,
    pub wholesale_units: u64,
    pub direct: ChannelContribution,
    pub wholesale: ChannelContribution,
    pub blend: Blend,
    pub break_even: BreakEven,
    pub bundle: PackContribution,
    pub subscription: PackContribution,
    pub price_per_100g: Decimal,
}

/// Validation errors for assumptions and scenario inputs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Willingness curve needs at least two points.
    #[error("willingness curve needs at least 2 points, got {0}")]
    CurveTooShort(usize),
    /// Curve prices must be strictly increasing once sorted.
    #[error("duplicate willingness price: {0}")]
    DuplicateCurvePrice(Decimal),
    /// Fractions must lie in [0,1].
    #[error("fraction willing must be within [0,1], got {0}")]
    InvalidFraction(Decimal),
    /// Price or cost must be non-negative.
    #[error("negative monetary value for {0}")]
    NegativeMoney(&'static str),
    /// Percentage outside [0,100] or fraction outside [0,1].
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// A multi-pack must contain at least one bag.
    #[error("bundle quantity must be >= 1")]
    EmptyBundle,
}

/// Validate a willingness-to-pay curve.
///
/// Non-increasing fractions are assumed but not enforced; a rising curve only
/// gets a warning.
pub fn validate_curve(points: &[WillingnessPoint]) -> Result<(), ValidationError> {
    if points.len() < 2 {
        return Err(ValidationError::CurveTooShort(points.len()));
    }
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.price.cmp(&b.price));
    for p in &sorted {
        if p.price < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney("willingness price"));
        }
        if p.fraction_willing < Decimal::ZERO || p.fraction_willing > Decimal::ONE {
            return Err(ValidationError::InvalidFraction(p.fraction_willing));
        }
    }
    for w in sorted.windows(2) {
        if w[0].price == w[1].price {
            return Err(ValidationError::DuplicateCurvePrice(w[1].price));
        }
        if w[1].fraction_willing > w[0].fraction_willing {
            tracing::warn!(
                price = %w[1].price,
                "willingness rises with price; interpolation will follow it anyway"
            );
        }
    }
    Ok(())
}

fn fraction_in_range(v: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if v < Decimal::ZERO || v > Decimal::ONE {
        return Err(ValidationError::OutOfRange(field));
    }
    Ok(())
}

/// Validate cost assumptions.
pub fn validate_costs(c: &CostAssumptions) -> Result<(), ValidationError> {
    let money = [
        (c.cogs.raw, "cogs.raw"),
        (c.cogs.co_pack, "cogs.co_pack"),
        (c.cogs.packaging, "cogs.packaging"),
        (c.inbound, "inbound"),
        (c.secondary, "secondary"),
        (c.direct_fulfillment, "direct_fulfillment"),
        (c.wholesale_freight, "wholesale_freight"),
    ];
    for (v, field) in money {
        if v < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney(field));
        }
    }
    fraction_in_range(c.payment_fee_pct, "payment_fee_pct")?;
    fraction_in_range(c.wholesale_allowances_pct, "wholesale_allowances_pct")?;
    fraction_in_range(c.retailer_margin_pct, "retailer_margin_pct")?;
    fraction_in_range(
        c.subscription_shipping_saving_pct,
        "subscription_shipping_saving_pct",
    )?;
    Ok(())
}

/// Validate the full assumption set.
pub fn validate_assumptions(a: &Assumptions) -> Result<(), ValidationError> {
    validate_costs(&a.costs)?;
    validate_curve(&a.willingness)?;
    if a.bag_grams <= Decimal::ZERO {
        return Err(ValidationError::OutOfRange("bag_grams"));
    }
    for c in &a.competitors {
        if c.price_per_100g < Decimal::ZERO {
            return Err(ValidationError::NegativeMoney("competitor price"));
        }
    }
    Ok(())
}

/// Validate scenario inputs against their documented ranges.
pub fn validate_inputs(s: &ScenarioInputs) -> Result<(), ValidationError> {
    if s.price < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("price"));
    }
    if s.fixed_monthly_cost < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("fixed_monthly_cost"));
    }
    if s.bundle_price < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney("bundle_price"));
    }
    if s.direct_mix_pct > 100 {
        return Err(ValidationError::OutOfRange("direct_mix_pct"));
    }
    if s.bundle_qty == 0 {
        return Err(ValidationError::EmptyBundle);
    }
    if s.subscription_discount_pct < Decimal::ZERO
        || s.subscription_discount_pct > Decimal::ONE_HUNDRED
    {
        return Err(ValidationError::OutOfRange("subscription_discount_pct"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_cogs_total_is_35() {
        assert_eq!(CogsBreakdown::default().total(), Decimal::new(35, 0));
    }

    #[test]
    fn landed_cogs_includes_inbound_and_secondary() {
        assert_eq!(CostAssumptions::default().landed_cogs(), Decimal::new(40, 0));
    }

    #[test]
    fn defaults_validate() {
        validate_assumptions(&Assumptions::default()).unwrap();
        validate_inputs(&ScenarioInputs::default()).unwrap();
    }

    #[test]
    fn curve_rejects_short_and_duplicate() {
        let one = vec![WillingnessPoint::new(Decimal::new(99, 0), Decimal::ONE)];
        assert_eq!(validate_curve(&one), Err(ValidationError::CurveTooShort(1)));

        let dup = vec![
            WillingnessPoint::new(Decimal::new(99, 0), Decimal::new(6, 1)),
            WillingnessPoint::new(Decimal::new(99, 0), Decimal::new(5, 1)),
        ];
        assert_eq!(
            validate_curve(&dup),
            Err(ValidationError::DuplicateCurvePrice(Decimal::new(99, 0)))
        );
    }

    #[test]
    fn curve_rejects_fraction_above_one() {
        let pts = vec![
            WillingnessPoint::new(Decimal::new(79, 0), Decimal::new(12, 1)),
            WillingnessPoint::new(Decimal::new(99, 0), Decimal::new(5, 1)),
        ];
        assert_eq!(
            validate_curve(&pts),
            Err(ValidationError::InvalidFraction(Decimal::new(12, 1)))
        );
    }

    #[test]
    fn curve_order_does_not_matter() {
        let mut pts = default_willingness_curve();
        pts.reverse();
        assert!(validate_curve(&pts).is_ok());
    }

    #[test]
    fn inputs_range_checks() {
        let mut s = ScenarioInputs::default();
        s.direct_mix_pct = 101;
        assert_eq!(
            validate_inputs(&s),
            Err(ValidationError::OutOfRange("direct_mix_pct"))
        );

        let s = ScenarioInputs::default().with(InputChange::BundleQty(0));
        assert_eq!(validate_inputs(&s), Err(ValidationError::EmptyBundle));

        let s = ScenarioInputs::default().with(InputChange::Price(Decimal::new(-1, 0)));
        assert_eq!(validate_inputs(&s), Err(ValidationError::NegativeMoney("price")));
    }

    #[test]
    fn apply_changes_one_field_only() {
        let before = ScenarioInputs::default();
        let mut after = before.clone();
        after.apply(InputChange::DirectMixPct(80));
        assert_eq!(after.direct_mix_pct, 80);
        assert_eq!(after.wholesale_mix_pct(), 20);
        assert_eq!(after.price, before.price);
        assert_eq!(after.bundle_qty, before.bundle_qty);
        assert_eq!(after.target_buyers, before.target_buyers);
    }

    #[test]
    fn serde_roundtrip_inputs() {
        let s = ScenarioInputs::default().with(InputChange::Price(Decimal::new(11950, 2)));
        let text = serde_json::to_string(&s).unwrap();
        let back: ScenarioInputs = serde_json::from_str(&text).unwrap();
        assert_eq!(back, s);
    }

    proptest! {
        #[test]
        fn mix_pcts_sum_to_100(d in 0u8..=100) {
            let s = ScenarioInputs::default().with(InputChange::DirectMixPct(d));
            prop_assert_eq!(u16::from(s.direct_mix_pct) + u16::from(s.wholesale_mix_pct()), 100);
        }

        #[test]
        fn non_negative_prices_validate(cents in 0i64..1_000_000) {
            let s = ScenarioInputs::default().with(InputChange::Price(Decimal::new(cents, 2)));
            prop_assert!(validate_inputs(&s).is_ok());
        }
    }
}
