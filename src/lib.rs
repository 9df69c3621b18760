//! ERW Figures Library
//!
//! Static publication figures for an enhanced-rock-weathering CDR scenario
//! study: CSV tables in, PNG charts out.
//!
//! Module organization:
//! - `erw`: domain types, palettes, data access, fit statistics
//! - `figures`: the four figure renderers
//! - `config`: run configuration
//! - `pipeline`: figure orchestration

pub mod config;
pub mod erw;
pub mod figures;
pub mod pipeline;
