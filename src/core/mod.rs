//! Runtime primitives: per-symbol analyzers and periodic evaluation

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;
