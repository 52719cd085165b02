//! Operation traits.
//!
//! Trait definitions live here; implementations are in the backend-specific
//! modules (cpu/, cuda/).

mod dot;

pub use dot::DotOps;
