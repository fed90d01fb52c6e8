//! # Quill Shared
//!
//! Wire types shared between the API server and its clients: request and
//! response DTOs plus the RFC 7807 error envelope.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldViolation};
