//! Outbound adapters implementing the domain's driven ports.

pub mod crypto;
pub mod persistence;
pub mod token;
