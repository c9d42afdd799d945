//! Export formats for reconciled ledgers

pub mod csv;
