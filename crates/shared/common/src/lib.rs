//! Utilities shared by the gateway and the back-office services.
//!
//! - Error type rendered as HTTP responses and gRPC statuses
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
