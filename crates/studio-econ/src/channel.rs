//! Per-bag contribution for the direct and wholesale channels.

use crate::{percent_of, round_currency};
use rust_decimal::Decimal;
use studio_core::{Channel, ChannelContribution, CostAssumptions};

/// Invoice price charged to a retailer: shelf price less retailer margin.
pub fn wholesale_invoice_price(price: Decimal, costs: &CostAssumptions) -> Decimal {
    round_currency(price * (Decimal::ONE - costs.retailer_margin_pct))
}

/// Contribution of one bag sold at shelf price `price` through `channel`.
///
/// Direct pays the payment fee and a full order's fulfillment; wholesale
/// pays allowances on the invoice and bulk freight. Both carry landed COGS.
/// Direct percentage is against gross price, wholesale against net revenue.
///
/// Example:
/// let c = unit_contribution(Decimal::new(139, 0), Channel::Direct, &CostAssumptions::default());
/// assert_eq!(c.contribution, Decimal::new(4983, 2));
pub fn unit_contribution(
    price: Decimal,
    channel: Channel,
    costs: &CostAssumptions,
) -> ChannelContribution {
    let cogs = costs.landed_cogs();
    match channel {
        Channel::Direct => {
            let payment_fee = price * costs.payment_fee_pct;
            let contribution =
                round_currency(price - payment_fee - costs.direct_fulfillment - cogs);
            ChannelContribution {
                channel,
                contribution,
                contribution_pct: percent_of(contribution, price),
                invoice_price: None,
            }
        }
        Channel::Wholesale => {
            let invoice = wholesale_invoice_price(price, costs);
            let allowances = invoice * costs.wholesale_allowances_pct;
            let net_revenue = invoice - allowances;
            let contribution =
                round_currency(net_revenue - costs.wholesale_freight - cogs);
            ChannelContribution {
                channel,
                contribution,
                contribution_pct: percent_of(contribution, net_revenue),
                invoice_price: Some(invoice),
            }
        }
    }
}
