//! Request middleware.

pub mod secret;

pub use secret::{SECRET_HEADER, webhook_secret_middleware};
