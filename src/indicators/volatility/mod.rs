//! Volatility indicators: price dispersion

pub mod dispersion;

pub use dispersion::*;
