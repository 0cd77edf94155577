//! Momentum indicators: windowed percentage price changes

pub mod price_change;

pub use price_change::*;
