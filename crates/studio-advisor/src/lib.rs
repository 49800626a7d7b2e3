#![deny(warnings)]

//! Rule-based advice for the strategy studio.
//!
//! [`recommend`] is a fixed decision table over [`ScenarioMetrics`]; the
//! static insight list lives in [`insights`]. Nothing here is learned or
//! random: the same metrics always give the same advice in the same order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use studio_core::ScenarioMetrics;
use tracing::debug;

pub mod insights;

/// Upper bound of the penetration price band, inclusive.
pub const PENETRATION_MAX_PRICE: Decimal = Decimal::from_parts(99, 0, 0, false, 0);
/// Upper bound of the hybrid price band, inclusive.
pub const HYBRID_MAX_PRICE: Decimal = Decimal::from_parts(139, 0, 0, false, 0);
/// Monthly break-even volume above which the plan is flagged as unrealistic.
pub const BREAK_EVEN_ALERT_UNITS: u64 = 50_000;

/// One line of advice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Price at or below the penetration band.
    PenetrationPricing,
    /// Price between the penetration and premium bands.
    HybridPricing,
    /// Price above the hybrid band.
    PremiumPricing,
    DirectSingleBagNegative,
    WholesaleProfitable,
    PromoteMultiPack,
    OfferSubscription,
    RevisitBreakEven,
}

impl Recommendation {
    pub fn message(self) -> &'static str {
        match self {
            Recommendation::PenetrationPricing => {
                "Penetration/Share-first: Price is aggressive and will capture a large cohort (60% WTP at ₹99)."
            }
            Recommendation::HybridPricing => {
                "Hybrid: Balances scale and margin; consider bundle promotions to lower effective shipping."
            }
            Recommendation::PremiumPricing => {
                "Sustainable margin/Profitability: Premium positioning; expect lower volumes but higher margin per bag."
            }
            Recommendation::DirectSingleBagNegative => {
                "D2C single-bag economics are negative. Use multi-packs or subscription to reduce per-bag fulfillment cost."
            }
            Recommendation::WholesaleProfitable => {
                "Wholesale is currently profitable per-unit; use retail presence to build brand and scale distribution."
            }
            Recommendation::PromoteMultiPack => {
                "Multi-pack (x3) yields better per-bag contribution — promote as preferred D2C SKU."
            }
            Recommendation::OfferSubscription => {
                "Offer a subscription (10% discount shown) to increase LTV and lower churn; subscription gives better per-bag margins due to shipping optimization."
            }
            Recommendation::RevisitBreakEven => {
                "Break-even requires very high scale at current pricing/mix — revisit channel mix and pricing or reduce fixed costs."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Price band advice; exactly one applies to any price.
pub fn price_band(price: Decimal) -> Recommendation {
    if price <= PENETRATION_MAX_PRICE {
        Recommendation::PenetrationPricing
    } else if price <= HYBRID_MAX_PRICE {
        Recommendation::HybridPricing
    } else {
        Recommendation::PremiumPricing
    }
}

/// Run the decision table. The first entry is always the price band; the
/// remaining checks keep their fixed order.
pub fn recommend(m: &ScenarioMetrics) -> Vec<Recommendation> {
    let mut recs = vec![price_band(m.price)];

    if m.direct.contribution < Decimal::ZERO {
        recs.push(Recommendation::DirectSingleBagNegative);
    }
    if m.wholesale.contribution > Decimal::ZERO {
        recs.push(Recommendation::WholesaleProfitable);
    }
    if m.bundle.contribution > m.direct.contribution {
        recs.push(Recommendation::PromoteMultiPack);
    }
    if m.subscription.contribution > m.direct.contribution {
        recs.push(Recommendation::OfferSubscription);
    }
    if !m.break_even.reachable || m.break_even.units_per_month > BREAK_EVEN_ALERT_UNITS {
        recs.push(Recommendation::RevisitBreakEven);
    }

    debug!(price = %m.price, count = recs.len(), "recommendations ready");
    recs
}

/// Messages for a set of recommendations, in order.
pub fn messages(recs: &[Recommendation]) -> Vec<String> {
    recs.iter().map(|r| r.message().to_string()).collect()
}
