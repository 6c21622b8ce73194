//! Fundboard - data layer for a fund performance dashboard
//!
//! Resolves the dashboard's three datasets (trade history, investment
//! reports and recommendations) from workbook/CSV sources, substitutes
//! deterministic sample data for missing sources, and joins reports with
//! recommended weights.

pub mod cache;
pub mod config;
pub mod datasets;
pub mod error;
pub mod importers;
pub mod resolver;
pub mod synthetic;
pub mod utils;

pub use error::{LoadError, SourceKind};
pub use resolver::{DataResolver, MalformedPolicy, ResolvedData};
