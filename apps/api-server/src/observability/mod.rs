//! Observability utilities: request IDs and tracing helpers.

pub mod request_id;
