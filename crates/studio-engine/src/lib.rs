#![deny(warnings)]

//! Recompute pipeline for the strategy studio.
//!
//! The presentation layer owns [`ScenarioInputs`], mutates one field per
//! interaction and calls [`recompute`] for a fresh [`ScenarioResult`]. The
//! engine keeps no state between calls.

use serde::{Deserialize, Serialize};
use studio_advisor::{recommend, Recommendation};
use studio_core::{Assumptions, InputChange, ScenarioInputs, ScenarioMetrics};
use tracing::{debug, debug_span};

pub use studio_advisor::insights::{insight_summary, INSIGHTS};
pub use studio_econ::benchmark::{positions, with_own_brand, BenchmarkPosition};
pub use studio_econ::bundle::{PackModel, PackQuote};
pub use studio_econ::demand::{price_realization_uplift_pts, DemandModel, DemandPoint};
pub use studio_econ::mix::{MixModel, MixOutcome};

/// Everything the dashboard renders for one input snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub metrics: ScenarioMetrics,
    pub recommendations: Vec<Recommendation>,
}

impl ScenarioResult {
    pub fn recommendation_messages(&self) -> Vec<String> {
        studio_advisor::messages(&self.recommendations)
    }
}

/// Derive metrics and advice from scratch.
pub fn recompute(inputs: &ScenarioInputs, assumptions: &Assumptions) -> ScenarioResult {
    let span = debug_span!("recompute", price = %inputs.price, mix = inputs.direct_mix_pct);
    let _enter = span.enter();

    let metrics = studio_econ::evaluate(inputs, assumptions);
    let recommendations = recommend(&metrics);
    debug!(
        volume = metrics.volume_per_year,
        blended = %metrics.blend.per_unit,
        break_even = metrics.break_even.units_per_month,
        reachable = metrics.break_even.reachable,
        "scenario recomputed"
    );
    ScenarioResult {
        metrics,
        recommendations,
    }
}

/// Apply one input change and recompute, as a slider callback would.
pub fn update(
    inputs: &mut ScenarioInputs,
    change: InputChange,
    assumptions: &Assumptions,
) -> ScenarioResult {
    inputs.apply(change);
    recompute(inputs, assumptions)
}
