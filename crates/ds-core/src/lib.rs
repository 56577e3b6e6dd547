//! diskuss/crates/ds-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Diskuss.

pub mod error;
pub mod models;
pub mod paging;
pub mod retention;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
