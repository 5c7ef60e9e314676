//! Warm-up seeding and the day-advance loop.

use super::orders::OrderPlan;
use super::window::blended_close;
use crate::domain::{DailyBar, PortfolioSnapshot};
use rust_decimal::Decimal;
use thiserror::Error;

/// Bars held flat at the start of a run to seed the trailing windows.
pub const WARMUP_BARS: usize = 30;

/// Minimum bar count: the warm-up window plus one tradable day.
pub const MIN_BARS: usize = WARMUP_BARS + 1;

/// Fatal pre-run conditions. No partial snapshot sequence is produced.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient data: got {got} bars, need at least 31")]
    InsufficientData { got: usize },

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(Decimal),
}

/// Run the strategy over a chronological bar sequence.
///
/// Produces one snapshot per bar — the first 30 held flat to seed the
/// trailing windows — plus a single terminal snapshot carrying the orders
/// that would go out next session. The caller is responsible for bar
/// validation (see `data::validate_bars`); the engine trusts its input.
///
/// Pure: identical inputs yield identical snapshot sequences.
pub fn run_backtest(
    initial_capital: Decimal,
    bars: &[DailyBar],
) -> Result<Vec<PortfolioSnapshot>, EngineError> {
    if initial_capital <= Decimal::ZERO {
        return Err(EngineError::NonPositiveCapital(initial_capital));
    }
    if bars.len() < MIN_BARS {
        return Err(EngineError::InsufficientData { got: bars.len() });
    }

    // The buy-and-hold baseline is the first bar *after* the warm-up window.
    let first_bar = bars[WARMUP_BARS].clone();
    let mut snapshots: Vec<PortfolioSnapshot> = bars[..WARMUP_BARS]
        .iter()
        .map(|bar| PortfolioSnapshot::flat(initial_capital, bar.clone(), first_bar.clone()))
        .collect();

    for bar in &bars[WARMUP_BARS..] {
        advance_day(&mut snapshots, Some(bar));
    }
    // One more step with no bar left: record next session's pending orders.
    advance_day(&mut snapshots, None);

    Ok(snapshots)
}

/// Advance the simulation by one day.
///
/// Plans the session's orders from the blended trailing reference, resolves
/// them against the new bar's range (or records them as pending when the
/// history is exhausted), and appends the resulting snapshot.
fn advance_day(snapshots: &mut Vec<PortfolioSnapshot>, bar: Option<&DailyBar>) {
    let yesterday = snapshots.last().expect("warm-up seeds the history");
    let mut today = match bar {
        Some(bar) => yesterday.carried_into(bar.clone()),
        None => yesterday.carried_into(yesterday.bar.synthetic_next()),
    };

    let avg_close = blended_close(snapshots);
    let plan = OrderPlan::derive(avg_close, yesterday);

    // Prices are truncated to cents; render them with a fixed two-decimal
    // width so the narrative does not depend on internal decimal scale.
    let Some(bar) = bar else {
        today.trade_log.push("next session".to_string());
        today.trade_log.push(format!(
            "pending ask {} * {:.2}",
            plan.sell_qty, plan.sell_price
        ));
        today.trade_log.push(format!(
            "pending bid {} * {:.2}",
            plan.buy_qty, plan.buy_price
        ));
        snapshots.push(today);
        return;
    };

    let mut sold = 0u64;
    let mut bought = 0u64;

    match plan.sell_fill(bar) {
        Some((qty, price)) if qty > 0 => {
            sold = qty;
            today.cash += Decimal::from(qty) * price;
            today.trade_log.push(format!(
                "ask {} * {:.2}, filled {} * {:.2}",
                plan.sell_qty, plan.sell_price, qty, price
            ));
        }
        _ => today
            .trade_log
            .push(format!("ask {} * {:.2}", plan.sell_qty, plan.sell_price)),
    }

    match plan.buy_fill(bar) {
        Some((qty, price)) if qty > 0 => {
            bought = qty;
            today.cash -= Decimal::from(qty) * price;
            today.trade_log.push(format!(
                "bid {} * {:.2}, filled {} * {:.2}",
                plan.buy_qty, plan.buy_price, qty, price
            ));
        }
        _ => today
            .trade_log
            .push(format!("bid {} * {:.2}", plan.buy_qty, plan.buy_price)),
    }

    // sell_qty is a lot-rounding of shares_held, so this cannot underflow.
    today.shares_held = today.shares_held - sold + bought;
    snapshots.push(today);
}
