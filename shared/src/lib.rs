//! Shared types for Trombetas
//!
//! Domain models, the registration aggregator, phone helpers and the unified
//! error system used by the PDF renderer and the HTTP server.

pub mod aggregate;
pub mod error;
pub mod models;
pub mod phone;
pub mod report;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use aggregate::{GroupFilter, group_by_member, missing_members};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
