//! Willingness-to-pay curve: fraction of target buyers who would pay a price.

use rust_decimal::Decimal;
use studio_core::WillingnessPoint;

/// A willingness curve sorted by ascending price.
///
/// Sorting happens once in [`WillingnessCurve::new`]; callers that evaluate
/// many prices against the same points (the demand chart) should keep one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WillingnessCurve {
    points: Vec<WillingnessPoint>,
}

impl WillingnessCurve {
    pub fn new(points: &[WillingnessPoint]) -> Self {
        let mut points = points.to_vec();
        points.sort_by(|a, b| a.price.cmp(&b.price));
        Self { points }
    }

    pub fn points(&self) -> &[WillingnessPoint] {
        &self.points
    }

    /// Fraction willing at `price`, clamped to the end points and linearly
    /// interpolated in between. An empty curve yields zero.
    pub fn fraction_at(&self, price: Decimal) -> Decimal {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Decimal::ZERO,
        };
        if price <= first.price {
            return first.fraction_willing;
        }
        if price >= last.price {
            return last.fraction_willing;
        }
        for seg in self.points.windows(2) {
            let (a, b) = (&seg[0], &seg[1]);
            if price >= a.price && price <= b.price {
                // zero-width segments only appear with duplicate prices
                let ratio = (price - a.price)
                    .checked_div(b.price - a.price)
                    .unwrap_or(Decimal::ZERO);
                return a.fraction_willing + ratio * (b.fraction_willing - a.fraction_willing);
            }
        }
        Decimal::ZERO
    }
}

/// Fraction of buyers willing to pay `price`, sorting `points` defensively.
///
/// Example:
/// let f = fraction_willing_to_pay(Decimal::new(119, 0), &default_willingness_curve());
/// assert_eq!(f, Decimal::new(475, 3));
pub fn fraction_willing_to_pay(price: Decimal, points: &[WillingnessPoint]) -> Decimal {
    WillingnessCurve::new(points).fraction_at(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use studio_core::default_willingness_curve;

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn interior_price_interpolates() {
        let pts = default_willingness_curve();
        assert_eq!(fraction_willing_to_pay(d(119), &pts), Decimal::new(475, 3));
        assert_eq!(fraction_willing_to_pay(d(90), &pts), Decimal::new(7125, 4));
        assert_eq!(fraction_willing_to_pay(d(150), &pts), Decimal::new(295, 3));
    }

    #[test]
    fn reference_points_are_exact() {
        let pts = default_willingness_curve();
        for p in &pts {
            assert_eq!(fraction_willing_to_pay(p.price, &pts), p.fraction_willing);
        }
    }

    #[test]
    fn clamps_outside_curve() {
        let pts = default_willingness_curve();
        assert_eq!(fraction_willing_to_pay(d(10), &pts), Decimal::new(85, 2));
        assert_eq!(fraction_willing_to_pay(d(500), &pts), Decimal::new(15, 2));
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let mut pts = default_willingness_curve();
        pts.reverse();
        assert_eq!(fraction_willing_to_pay(d(119), &pts), Decimal::new(475, 3));
    }

    #[test]
    fn degenerate_curves() {
        assert_eq!(fraction_willing_to_pay(d(100), &[]), Decimal::ZERO);
        let one = [WillingnessPoint::new(d(99), Decimal::new(6, 1))];
        assert_eq!(fraction_willing_to_pay(d(10), &one), Decimal::new(6, 1));
        assert_eq!(fraction_willing_to_pay(d(200), &one), Decimal::new(6, 1));
    }

    #[test]
    fn duplicate_prices_do_not_divide_by_zero() {
        let pts = [
            WillingnessPoint::new(d(79), Decimal::new(9, 1)),
            WillingnessPoint::new(d(99), Decimal::new(6, 1)),
            WillingnessPoint::new(d(99), Decimal::new(5, 1)),
            WillingnessPoint::new(d(139), Decimal::new(3, 1)),
        ];
        let f = fraction_willing_to_pay(d(99), &pts);
        assert!(f == Decimal::new(6, 1) || f == Decimal::new(5, 1));
    }

    proptest! {
        #[test]
        fn fraction_stays_within_curve(cents in 0i64..30_000) {
            let pts = default_willingness_curve();
            let f = fraction_willing_to_pay(Decimal::new(cents, 2), &pts);
            prop_assert!(f >= Decimal::new(15, 2));
            prop_assert!(f <= Decimal::new(85, 2));
        }

        #[test]
        fn fraction_non_increasing(cents in 7_000i64..19_000, step in 1i64..1_000) {
            let curve = WillingnessCurve::new(&default_willingness_curve());
            let lo = curve.fraction_at(Decimal::new(cents, 2));
            let hi = curve.fraction_at(Decimal::new(cents + step, 2));
            prop_assert!(hi <= lo);
        }
    }
}
