//! Domain layer - Pure business abstractions
//!
//! This layer contains no HTTP handlers and no queries.
//! Only data types, trait definitions, report helpers and domain error types.

pub mod errors;
pub mod report;
pub mod repositories;

pub use errors::DomainError;
pub use report::SurveyStatus;
pub use repositories::*;
