//! The four figure renderers
//!
//! Each module is a flat load -> reshape -> draw -> save pipeline over one
//! or more input tables, sharing the canvas helpers and the fixed category
//! domains in `crate::erw`.

pub mod adoption;
pub mod canvas;
pub mod income;
pub mod scatter;
pub mod sequestration;
