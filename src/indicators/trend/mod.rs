//! Trend indicators: directional consistency

pub mod direction;

pub use direction::*;
