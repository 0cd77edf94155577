//! Tollgate: scheduled price collection and BUY/HOLD/SELL signal generation.
//!
//! The deterministic core lives in [`indicators`] and [`signals`]; everything
//! else is host plumbing that feeds it price history and persists its output.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
