//! Meanline Core — engine and domain types for a lot-based mean-line backtester.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (daily bars, per-day portfolio snapshots)
//! - The day-advance loop: blended trailing reference price, limit order
//!   planning, fill resolution against each day's high/low range
//! - Market data layer (provider trait, Sohu quote provider, pre-run
//!   validation)
//!
//! The engine is a pure function of its inputs: identical capital and bar
//! sequences produce identical snapshot sequences.

pub mod data;
pub mod domain;
pub mod engine;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync so a finished run can
    /// be handed to another thread for rendering.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::DailyBar>();
        require_sync::<domain::DailyBar>();
        require_send::<domain::PortfolioSnapshot>();
        require_sync::<domain::PortfolioSnapshot>();

        require_send::<engine::OrderPlan>();
        require_sync::<engine::OrderPlan>();
        require_send::<engine::EngineError>();
        require_sync::<engine::EngineError>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }
}
