//! Market data retrieval and pre-run validation.
//!
//! The engine consumes an already-validated bar sequence and never looks at
//! this layer; failures here surface to the caller before a run starts.

pub mod provider;
pub mod sohu;

pub use provider::{BarProvider, DataError};
pub use sohu::SohuProvider;

use crate::domain::DailyBar;

/// Gate a bar sequence before it reaches the engine: non-empty, strictly
/// increasing unique dates, and sane OHLC ranges on every bar.
pub fn validate_bars(bars: &[DailyBar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::Validation("empty bar sequence".into()));
    }
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(DataError::Validation(format!(
                "dates not strictly increasing: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
    }
    for bar in bars {
        if !bar.is_sane() {
            return Err(DataError::Validation(format!(
                "malformed OHLC range on {}",
                bar.date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bar(day: u32) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: dec!(10),
            close: dec!(10.20),
            change: Decimal::ZERO,
            change_pct: Decimal::ZERO,
            low: dec!(9.90),
            high: dec!(10.40),
            volume: 1_000,
            turnover: Decimal::ZERO,
            volume_ratio: Decimal::ZERO,
        }
    }

    #[test]
    fn accepts_well_formed_sequence() {
        let bars = vec![bar(1), bar(2), bar(5)];
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn rejects_empty_sequence() {
        assert!(matches!(
            validate_bars(&[]),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let bars = vec![bar(1), bar(1)];
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let bars = vec![bar(2), bar(1)];
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        let mut bad = bar(1);
        bad.low = dec!(11);
        assert!(validate_bars(&[bad]).is_err());
    }
}
