//! Ledger module: row filtering, normalization, running balances and the write side

pub mod balance;
pub mod balance_sheet;
pub mod customer;
pub mod draft;
pub mod filter;
pub mod normalize;
pub mod reconciler;
pub mod summary;

pub use balance::*;
pub use balance_sheet::*;
pub use customer::*;
pub use draft::*;
pub use filter::*;
pub use normalize::*;
pub use reconciler::*;
pub use summary::*;
