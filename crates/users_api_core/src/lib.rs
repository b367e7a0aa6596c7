//! Platform-free primitives for the users API.
//!
//! This crate owns the request/response contract, routing, validation, and the
//! storage adapter boundary. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `users_api_lambda`.

pub mod error;
pub mod event;
pub mod handler;
pub mod memory_store;
pub mod response;
pub mod routing;
pub mod store;
pub mod user;

pub use error::{BodyError, RequestError, StoreError};
pub use handler::{HandlerConfig, UsersHandler};
pub use memory_store::InMemoryUserStore;
pub use response::ApiGatewayResponse;
pub use store::{Deleted, UserStore};
pub use user::{EmailPolicy, User, UserId, UserInput};
