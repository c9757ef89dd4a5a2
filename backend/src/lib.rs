//! TripAdapt backend library.
//!
//! Hexagonal layout: `domain` holds entities, services and ports;
//! `inbound::http` drives the services over REST; `outbound` implements the
//! driven ports against PostgreSQL, process memory and the completion API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
