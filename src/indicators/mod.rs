//! Price-history indicators feeding the signal scorer.
//!
//! All functions take a newest-first slice of observations and are pure.

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use momentum::*;
pub use trend::*;
pub use volatility::*;
