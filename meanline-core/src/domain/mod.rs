//! Domain types for meanline.

pub mod bar;
pub mod snapshot;

pub use bar::DailyBar;
pub use snapshot::PortfolioSnapshot;
