//! Dashboard pipeline: filtered working set, aggregation pass, display view.
//!
//! - [`DashboardService`] runs one pass over a snapshot
//! - [`DashboardCache`] memoizes passes per snapshot version and filters
//! - [`DashboardView`] converts a summary into the display currency

pub mod cache;
pub mod service;
pub mod types;
pub mod view;


pub use cache::DashboardCache;
pub use service::DashboardService;
pub use types::{DashboardSummary, DashboardTotals};
pub use view::{DashboardView, DisplayBalance, DisplayBucket, DisplayRollup, DisplayTotals};
