//! HTTP middleware shared by the inbound adapters.

pub mod trace;
