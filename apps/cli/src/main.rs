#![deny(warnings)]

//! Headless CLI: load assumptions, apply slider overrides and print the
//! resulting studio numbers.

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use studio_core::config::{load_config, StudioConfig};
use studio_core::{validate_inputs, InputChange, ScenarioInputs};
use studio_engine::{
    insight_summary, positions, price_realization_uplift_pts, recompute, with_own_brand,
    DemandModel, MixModel, PackModel, ScenarioResult,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: studio [--config <path>] [--price <n>] [--mix <pct>] [--buyers <n>] \
[--fixed <n>] [--bundle-qty <n>] [--bundle-price <n>] [--sub-discount <pct>] \
[--dashboard] [--json] [--version]";

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    changes: Vec<InputChange>,
    dashboard: bool,
    json: bool,
    version: bool,
}

fn value<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn decimal(s: &str, flag: &str) -> Result<Decimal> {
    Decimal::from_str(s).with_context(|| format!("{flag}: not a number: {s}"))
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(value(&mut it, &arg)?),
            "--price" => {
                let v = decimal(&value(&mut it, &arg)?, &arg)?;
                args.changes.push(InputChange::Price(v));
            }
            "--mix" => {
                let v = value(&mut it, &arg)?
                    .parse()
                    .with_context(|| format!("{arg} expects 0..=100"))?;
                args.changes.push(InputChange::DirectMixPct(v));
            }
            "--buyers" => {
                let v = value(&mut it, &arg)?
                    .parse()
                    .with_context(|| format!("{arg} expects a count"))?;
                args.changes.push(InputChange::TargetBuyers(v));
            }
            "--fixed" => {
                let v = decimal(&value(&mut it, &arg)?, &arg)?;
                args.changes.push(InputChange::FixedMonthlyCost(v));
            }
            "--bundle-qty" => {
                let v = value(&mut it, &arg)?
                    .parse()
                    .with_context(|| format!("{arg} expects a count"))?;
                args.changes.push(InputChange::BundleQty(v));
            }
            "--bundle-price" => {
                let v = decimal(&value(&mut it, &arg)?, &arg)?;
                args.changes.push(InputChange::BundlePrice(v));
            }
            "--sub-discount" => {
                let v = decimal(&value(&mut it, &arg)?, &arg)?;
                args.changes.push(InputChange::SubscriptionDiscountPct(v));
            }
            "--dashboard" => args.dashboard = true,
            "--json" => args.json = true,
            "--version" => args.version = true,
            "-h" | "--help" => bail!("{USAGE}"),
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
    }
    if args.json && args.dashboard {
        bail!("--dashboard renders text widgets and cannot be combined with --json");
    }
    Ok(args)
}

fn print_report(inputs: &ScenarioInputs, r: &ScenarioResult) {
    let m = &r.metrics;
    println!(
        "Scenario | price: ₹{} | mix: {}% D2C / {}% wholesale | buyers: {} | fixed: ₹{}/month",
        inputs.price,
        inputs.direct_mix_pct,
        inputs.wholesale_mix_pct(),
        inputs.target_buyers,
        inputs.fixed_monthly_cost
    );
    println!(
        "Demand   | willing: {}% | volume: {} | revenue: ₹{} | D2C units: {} | wholesale units: {}",
        (m.fraction_willing * Decimal::ONE_HUNDRED).round_dp(1),
        m.volume_per_year,
        m.revenue_per_year,
        m.direct_units,
        m.wholesale_units
    );
    println!(
        "Unit     | D2C: ₹{} ({}%) | wholesale: ₹{} ({}%, WSP ₹{}) | blended: ₹{} ({}%)",
        m.direct.contribution,
        m.direct.contribution_pct,
        m.wholesale.contribution,
        m.wholesale.contribution_pct,
        m.wholesale.invoice_price.unwrap_or(Decimal::ZERO),
        m.blend.per_unit,
        m.blend.pct
    );
    let reach = if m.break_even.reachable {
        ""
    } else {
        " (unreachable)"
    };
    println!(
        "Break-even | {} units/month | {} units/year{}",
        m.break_even.units_per_month, m.break_even.units_per_year, reach
    );
    println!(
        "Packs    | bundle x{}: ₹{}/bag (ship ₹{}) | subscription: ₹{}/bag at ₹{}",
        inputs.bundle_qty.max(1),
        m.bundle.contribution,
        m.bundle.shipping,
        m.subscription.contribution,
        m.subscription.unit_price
    );
    println!("Advice:");
    for msg in r.recommendation_messages() {
        println!("  - {msg}");
    }
}

fn print_dashboard(cfg: &StudioConfig, inputs: &ScenarioInputs) {
    let demand = DemandModel::default();
    println!("Demand curve (pricing simulator):");
    for pt in demand.default_curve() {
        println!("  ₹{:>4} -> {}", pt.price, pt.demand);
    }
    println!(
        "  margin at ₹{}: {}% | +₹5 realization adds {} pts",
        inputs.price,
        demand.margin_pct(inputs.price),
        price_realization_uplift_pts(inputs.price, Decimal::new(5, 0))
    );

    let mix = MixModel::default().evaluate(inputs.direct_mix_pct);
    println!(
        "Channel mix @ {}% D2C: blended margin {}% | contribution ₹{}/unit | break-even {} units/month",
        mix.direct_pct,
        mix.blended_margin_pct,
        mix.contribution_per_unit,
        mix.break_even.units_per_month
    );

    println!("Pack builder:");
    let packs = PackModel::default();
    for subscribe in [false, true] {
        for q in packs.quotes(subscribe) {
            println!(
                "  {}-pack{}: ₹{} | fulfillment ₹{} | margin {}% | retention +{}%",
                q.pack_size,
                if q.subscribed { " (sub)" } else { "" },
                q.pack_price,
                q.fulfillment_cost,
                q.gross_margin_pct,
                q.retention_lift_pct
            );
        }
    }

    println!("Benchmark (₹/100g):");
    let rows = with_own_brand(
        &cfg.assumptions.competitors,
        "Verde Bites",
        inputs.price,
        cfg.assumptions.bag_grams,
    );
    for p in positions(&rows) {
        println!("  {:<12} {:>8} | {}% of max", p.name, p.price_per_100g, p.pct_of_max);
    }

    println!("Insights: {}", insight_summary());
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.version {
        println!("studio {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_SHA"));
        return Ok(());
    }
    info!(config = ?args.config, overrides = args.changes.len(), "starting studio");

    let cfg = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {path}"))?,
        None => StudioConfig::default(),
    };

    let mut inputs = cfg.scenario.clone();
    for change in args.changes.iter().cloned() {
        inputs.apply(change);
    }
    validate_inputs(&inputs).context("invalid scenario overrides")?;

    let result = recompute(&inputs, &cfg.assumptions);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&inputs, &result);
        if args.dashboard {
            print_dashboard(&cfg, &inputs);
        }
    }
    Ok(())
}
