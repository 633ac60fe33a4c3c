//! Data Transfer Objects for REST request parsing.
//!
//! Response bodies are the domain types themselves, serialized in
//! camelCase.

pub mod common_dto;

pub use common_dto::*;
