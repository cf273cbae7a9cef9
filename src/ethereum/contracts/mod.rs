//! Smart contract bindings.

pub mod transactions;
