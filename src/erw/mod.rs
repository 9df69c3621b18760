//! Domain types and data access for the ERW figure pipeline
//!
//! Structure:
//! - `domain.rs`: fixed category domains (regions, scenarios, income groups, periods)
//! - `palettes.rs`: embedded sequential color scales
//! - `data.rs`: CSV loading and column extraction
//! - `stats.rs`: least-squares fit for the scatter overlay
//! - `error.rs`: error types

pub mod data;
pub mod domain;
pub mod error;
pub mod palettes;
pub mod stats;

// Re-exports for convenience
pub use domain::{IncomeGroup, LineStyle, Period, Region, Scenario};
pub use error::{draw_err, FigureError, Result};
