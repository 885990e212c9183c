//! Infrastructure adapters: the HTTP client and telemetry bootstrap.

pub mod api;
pub mod error;
pub mod telemetry;
