//! AWS-oriented adapters and handlers for the users API.
//!
//! This crate owns runtime integration details (Lambda handlers, DynamoDB
//! storage, environment configuration and log setup) on top of the
//! platform-free contract in `users_api_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
