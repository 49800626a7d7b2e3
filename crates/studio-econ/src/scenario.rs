//! Derive every studio number from one input snapshot.

use crate::benchmark::price_per_100g;
use crate::breakeven::{blend, break_even, split_volume};
use crate::bundle::{bundle_contribution, subscription_contribution};
use crate::channel::unit_contribution;
use crate::wtp::fraction_willing_to_pay;
use crate::{round_currency, round_units, saturating_mul};
use rust_decimal::Decimal;
use studio_core::{Assumptions, Channel, ScenarioInputs, ScenarioMetrics};

/// Compute [`ScenarioMetrics`] from scratch. Pure; no cached state.
pub fn evaluate(inputs: &ScenarioInputs, assumptions: &Assumptions) -> ScenarioMetrics {
    let costs = &assumptions.costs;
    let price = inputs.price;

    let fraction_willing = fraction_willing_to_pay(price, &assumptions.willingness);
    let volume_per_year =
        round_units(saturating_mul(Decimal::from(inputs.target_buyers), fraction_willing));
    let revenue_per_year = round_currency(saturating_mul(Decimal::from(volume_per_year), price));
    let (direct_units, wholesale_units) = split_volume(volume_per_year, inputs.direct_mix_pct);

    let direct = unit_contribution(price, Channel::Direct, costs);
    let wholesale = unit_contribution(price, Channel::Wholesale, costs);
    let blend = blend(&direct, &wholesale, direct_units, wholesale_units, price);
    let break_even = break_even(inputs.fixed_monthly_cost, blend.per_unit);

    ScenarioMetrics {
        price,
        fraction_willing,
        volume_per_year,
        revenue_per_year,
        direct_units,
        wholesale_units,
        direct,
        wholesale,
        blend,
        break_even,
        bundle: bundle_contribution(inputs.bundle_price, inputs.bundle_qty, costs),
        subscription: subscription_contribution(price, inputs.subscription_discount_pct, costs),
        price_per_100g: price_per_100g(price, assumptions.bag_grams),
    }
}
