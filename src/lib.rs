//! Read-only analytics core for government work-order tracking.
//!
//! A mock generator produces a 12-month window of work orders; the
//! aggregation, query and trend modules turn one owned snapshot of that
//! collection into overview statistics, per-region and per-month breakdowns,
//! and filterable, paginated table pages. The `output` module exports any of
//! those views as CSV or JSON.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod output;
pub mod query;
pub mod reports;
pub mod trend;
pub mod types;
pub mod util;

pub use dataset::{DashboardSnapshot, Dataset};
pub use error::ReportError;
pub use generator::{GenerationReport, GeneratorConfig};
pub use query::{Filter, FilterOptions, QueryPage};
pub use types::{Region, Status, Vendor, WorkOrder};
