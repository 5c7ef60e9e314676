//! Blended trailing reference price.
//!
//! Eight overlapping trailing windows over the snapshot history
//! (30/15/10/5/4/3/2/1 days) are concatenated before averaging, so a day
//! that appears in more windows carries more weight; the most recent close
//! appears in all eight. This weighting is the strategy's defining behavior
//! and is intentionally not a plain moving average.

use crate::domain::PortfolioSnapshot;
use rust_decimal::Decimal;

/// Trailing window lengths, longest first. The mean is taken over the
/// concatenation of all eight, duplicates included.
pub const WINDOWS: [usize; 8] = [30, 15, 10, 5, 4, 3, 2, 1];

/// Weighted mean close over the trailing windows of `history`.
///
/// With at least 30 days of history every call averages 70 samples drawn
/// from the last 30 closes. Shorter histories shrink each window to what
/// exists; `history` must be non-empty.
pub fn blended_close(history: &[PortfolioSnapshot]) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;
    for &len in &WINDOWS {
        let tail = &history[history.len().saturating_sub(len)..];
        for snap in tail {
            sum += snap.bar.close;
            count += 1;
        }
    }
    sum / Decimal::from(count)
}
