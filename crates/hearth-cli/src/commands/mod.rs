//! Command implementations
//!
//! Organized by area:
//! - `core` - Shared utilities, init, status
//! - `serve` - Web server
//! - `records` - Transaction, bill, and loan management
//! - `budget` - Plan selection and monthly analysis
//! - `import` - Statement CSV import

mod budget;
mod core;
mod import;
mod records;
mod serve;

pub use budget::*;
pub use core::*;
pub use import::*;
pub use records::*;
pub use serve::*;
