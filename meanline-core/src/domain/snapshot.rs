//! PortfolioSnapshot — cash, holdings, and trade narrative for one simulated day.

use super::bar::DailyBar;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Portfolio state after one simulated trading day.
///
/// Snapshots form an append-only sequence owned by the run that produced
/// them; each one derives from its predecessor plus a single new bar and is
/// never mutated afterwards. Derived metrics are computed on demand, not
/// stored, and truncate toward zero at a fixed scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Capital at the start of the run; identical across all snapshots.
    pub initial_capital: Decimal,
    /// Uninvested cash.
    pub cash: Decimal,
    /// Shares held at the end of the day. Unsigned: the engine sizes sell
    /// orders below the holding, so a negative count is unrepresentable.
    pub shares_held: u64,
    /// The bar this snapshot corresponds to.
    pub bar: DailyBar,
    /// Bar at the end of the warm-up window; baseline for the buy-and-hold
    /// comparison. Copied by value into every snapshot of a run.
    pub first_bar: DailyBar,
    /// Human-readable order narrative for this day, in placement order.
    pub trade_log: Vec<String>,
}

impl PortfolioSnapshot {
    /// Snapshot with no position: all capital in cash.
    pub fn flat(initial_capital: Decimal, bar: DailyBar, first_bar: DailyBar) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            shares_held: 0,
            bar,
            first_bar,
            trade_log: Vec::new(),
        }
    }

    /// Carry yesterday's holdings into a new day with an empty trade log.
    pub fn carried_into(&self, bar: DailyBar) -> Self {
        Self {
            initial_capital: self.initial_capital,
            cash: self.cash,
            shares_held: self.shares_held,
            bar,
            first_bar: self.first_bar.clone(),
            trade_log: Vec::new(),
        }
    }

    /// Mark-to-market equity: cash plus holdings at this day's close.
    pub fn total_asset_value(&self) -> Decimal {
        self.cash + Decimal::from(self.shares_held) * self.bar.close
    }

    /// Cash as a percentage of total equity, truncated to two decimals.
    pub fn cash_ratio(&self) -> Decimal {
        (self.cash * dec!(10000) / self.total_asset_value()).trunc() / dec!(100)
    }

    /// Holdings as a percentage of total equity, truncated to two decimals.
    pub fn shares_ratio(&self) -> Decimal {
        (Decimal::from(self.shares_held) * self.bar.close * dec!(10000)
            / self.total_asset_value())
        .trunc()
            / dec!(100)
    }

    /// Return on initial capital as a percentage, truncated to two decimals.
    pub fn return_pct(&self) -> Decimal {
        ((self.total_asset_value() - self.initial_capital) * dec!(10000) / self.initial_capital)
            .trunc()
            / dec!(100)
    }

    /// Excess return over buying at the first post-warm-up close and
    /// holding, as a percentage. `None` while the snapshot does not
    /// post-date the baseline bar (the comparison does not exist yet).
    pub fn return_vs_buy_hold(&self) -> Option<Decimal> {
        if self.bar.date <= self.first_bar.date {
            return None;
        }
        let strategy = (self.total_asset_value() - self.initial_capital) / self.initial_capital;
        let hold = (self.bar.close - self.first_bar.close) / self.first_bar.close;
        Some(((strategy - hold) * dec!(10000)).trunc() / dec!(100))
    }
}

impl fmt::Display for PortfolioSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}%) = {} + {} * {}",
            self.bar.date,
            self.total_asset_value(),
            self.return_pct(),
            self.cash,
            self.shares_held,
            self.bar.close
        )
    }
}
