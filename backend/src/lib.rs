//! Idea capture backend library.
//!
//! Layout follows the hexagonal boundary: [`domain`] holds the core types,
//! services, and ports; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the driven ports against PostgreSQL, JWT, and
//! Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::trace::Trace;
