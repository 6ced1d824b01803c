//! Matching and completion backend for short-term student jobs.
//!
//! Employers and students express interest in one another per job; mutual
//! interest produces a match, and both parties confirm completion before the
//! job closes. The crate is laid out as a hexagon: `domain` holds entities,
//! ports and services, `inbound` exposes them over HTTP, and `outbound`
//! provides PostgreSQL and JWT adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
