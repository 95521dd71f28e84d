//! Lifecycle and access-control core for an e-waste collection and donation
//! service, plus the ambient pieces (configuration, telemetry, HTTP error
//! surface) the service shell builds on.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod telemetry;
