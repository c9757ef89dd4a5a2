//! HTTP inbound adapter exposing the JSON endpoints.
//!
//! Handlers parse bodies into request DTOs, validate them into domain
//! requests, call a driving port from [`state::HttpState`] and serialise the
//! result. Failures travel as [`crate::domain::Error`] and are rendered by
//! [`error`].

pub mod error;
pub mod feedback;
pub mod health;
pub mod responses;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod surveys;
#[cfg(test)]
pub mod test_utils;
pub mod trips;
pub mod trips_dto;
pub mod users;
pub mod validation;

pub use error::ApiResult;
