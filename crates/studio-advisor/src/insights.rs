//! Canned strategy insights shown on the insights card.

/// Fixed insight lines, in display order.
pub const INSIGHTS: [&str; 4] = [
    "Optimal price band appears near ₹99–₹109 with strong margin realization.",
    "Shift 10–15% mix from wholesale to D2C to raise blended margin by ~2–3 pts.",
    "Introduce 6-pack subscription with 10% off; target 18% retention lift.",
    "Benchmark indicates headroom to premiumize flagship SKU by ₹10–₹15.",
];

/// All insight lines joined into one paragraph.
pub fn insight_summary() -> String {
    INSIGHTS.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_joins_with_spaces() {
        let s = insight_summary();
        assert!(s.starts_with(INSIGHTS[0]));
        assert!(s.ends_with(INSIGHTS[3]));
        assert_eq!(s.len(), INSIGHTS.iter().map(|l| l.len()).sum::<usize>() + 3);
    }
}
