//! DailyBar — the fundamental market data unit.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day's aggregated price/volume record.
///
/// All price fields are exact decimals: the quote endpoint ships prices as
/// strings with two decimal places, and the engine's truncation rules must
/// not drift the way binary floats would over long histories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub close: Decimal,
    /// Close-to-close change versus the prior session.
    pub change: Decimal,
    /// Close-to-close change as a percentage.
    pub change_pct: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub volume: u64,
    pub turnover: Decimal,
    /// Volume relative to the recent average, as a percentage.
    pub volume_ratio: Decimal,
}

impl DailyBar {
    /// Basic OHLC sanity check: low <= open/close <= high, positive prices.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > Decimal::ZERO
            && self.close > Decimal::ZERO
    }

    /// Placeholder bar for the session after the last historical day: same
    /// price range, dated one day later, no traded volume. The terminal
    /// backtest step stamps its "pending order" snapshot with this.
    pub fn synthetic_next(&self) -> DailyBar {
        DailyBar {
            date: self.date + Duration::days(1),
            open: self.open,
            close: self.close,
            change: Decimal::ZERO,
            change_pct: Decimal::ZERO,
            low: self.low,
            high: self.high,
            volume: 0,
            turnover: Decimal::ZERO,
            volume_ratio: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_bar() -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: dec!(10.00),
            close: dec!(10.30),
            change: dec!(0.30),
            change_pct: dec!(3.00),
            low: dec!(9.80),
            high: dec!(10.50),
            volume: 50_000,
            turnover: dec!(515000.00),
            volume_ratio: dec!(1.20),
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_inverted_high_low() {
        let mut bar = sample_bar();
        bar.high = dec!(9.70); // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_nonpositive_price() {
        let mut bar = sample_bar();
        bar.open = Decimal::ZERO;
        bar.low = Decimal::ZERO;
        assert!(!bar.is_sane());
    }

    #[test]
    fn synthetic_next_shifts_date_and_zeroes_volume() {
        let bar = sample_bar();
        let next = bar.synthetic_next();
        assert_eq!(next.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(next.open, bar.open);
        assert_eq!(next.close, bar.close);
        assert_eq!(next.low, bar.low);
        assert_eq!(next.high, bar.high);
        assert_eq!(next.volume, 0);
        assert_eq!(next.turnover, Decimal::ZERO);
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
