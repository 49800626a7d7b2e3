//! Competitive price positioning per 100 g.

use crate::{percent_of, round_currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_core::BenchmarkEntry;

/// Shelf price normalised to 100 g. Zero for a zero-weight pack.
pub fn price_per_100g(price: Decimal, grams: Decimal) -> Decimal {
    price
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(grams))
        .map(round_currency)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkPosition {
    pub name: String,
    pub price_per_100g: Decimal,
    /// Price relative to the most expensive entry, in percent.
    pub pct_of_max: Decimal,
}

/// Position of each entry against the most expensive one, in input order.
pub fn positions(entries: &[BenchmarkEntry]) -> Vec<BenchmarkPosition> {
    let max = entries
        .iter()
        .map(|e| e.price_per_100g)
        .max()
        .unwrap_or(Decimal::ZERO);
    entries
        .iter()
        .map(|e| BenchmarkPosition {
            name: e.name.clone(),
            price_per_100g: e.price_per_100g,
            pct_of_max: percent_of(e.price_per_100g, max),
        })
        .collect()
}

/// The competitive set plus our own bag as the last row.
pub fn with_own_brand(
    competitors: &[BenchmarkEntry],
    brand: &str,
    price: Decimal,
    grams: Decimal,
) -> Vec<BenchmarkEntry> {
    let mut rows = competitors.to_vec();
    rows.push(BenchmarkEntry::new(
        brand,
        price_per_100g(price, grams),
        "High-protein, vegan, gluten-free",
    ));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::default_competitors;

    #[test]
    fn own_bag_per_100g() {
        assert_eq!(
            price_per_100g(Decimal::new(139, 0), Decimal::new(113, 0)),
            Decimal::new(12301, 2)
        );
        assert_eq!(price_per_100g(Decimal::new(139, 0), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn most_expensive_is_100_pct() {
        let pos = positions(&default_competitors());
        assert_eq!(pos.len(), 4);
        assert_eq!(pos[3].name, "Comp-D");
        assert_eq!(pos[3].pct_of_max, Decimal::ONE_HUNDRED);
        assert_eq!(pos[2].pct_of_max, Decimal::new(7893, 2));
    }

    #[test]
    fn own_brand_row_is_appended() {
        let rows = with_own_brand(
            &default_competitors(),
            "Verde Bites",
            Decimal::new(139, 0),
            Decimal::new(113, 0),
        );
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].price_per_100g, Decimal::new(12301, 2));
    }

    #[test]
    fn empty_set_has_no_positions() {
        assert!(positions(&[]).is_empty());
    }
}
