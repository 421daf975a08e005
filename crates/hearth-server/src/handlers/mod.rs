//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod bills;
pub mod budget;
pub mod dashboard;
pub mod loans;
pub mod transactions;

// Re-export all handlers for use in router
pub use bills::*;
pub use budget::*;
pub use dashboard::*;
pub use loans::*;
pub use transactions::*;
