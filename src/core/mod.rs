//! Host runtime: analysis cycles, scheduling and the read API

pub mod http;
pub mod runtime;
pub mod scheduler;

pub use http::*;
pub use runtime::*;
pub use scheduler::*;
