//! Pricing helpers for the transaction entry side

pub mod amount;

pub use amount::*;
