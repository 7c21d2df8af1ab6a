//! Core domain types and utilities for the cobalt-relay platform.
//!
//! This crate provides the foundational ID types and error handling shared
//! by the cobalt-relay workflow automation engine and its callers.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ApprovalId, ExecutionId, ParseIdError, WorkflowId};
