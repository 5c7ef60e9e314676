//! The backtest engine: warm-up seeding, order planning, day-advance loop.

pub mod backtest;
pub mod orders;
pub mod window;

pub use backtest::{run_backtest, EngineError, MIN_BARS, WARMUP_BARS};
pub use orders::{OrderPlan, LOT, MIN_NOTIONAL};
pub use window::{blended_close, WINDOWS};
