//! File-backed persistence for prices, signals and run summaries.

pub mod json_store;

pub use json_store::{JsonStore, StorageHealth};
