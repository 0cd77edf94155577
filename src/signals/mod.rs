//! Signal generation: scoring price history and reconciling with an AI opinion.

pub mod engine;
pub mod reconcile;
pub mod scoring;

pub use engine::*;
pub use reconcile::*;
pub use scoring::*;
