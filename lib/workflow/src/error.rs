//! Error types for the workflow crate.
//!
//! The taxonomy mirrors the engine's failure boundaries:
//! - Structural problems (missing trigger, dangling connection, duplicate
//!   ID, cycle) are reported by the validator as a
//!   [`ValidationReport`](crate::validator::ValidationReport),
//!   not as errors — an invalid workflow is a normal, fully-reported
//!   outcome, never a mid-run surprise.
//! - Template paths that fail to resolve are not errors at all; they
//!   resolve to the empty string by design.
//! - [`ExecuteError`] covers node execution failures, caught at the node
//!   executor boundary and turned into an error-severity log plus a
//!   `Failed` run status by the orchestrator.
//!
//! Callers layering additional context use rootcause's `.context()` via
//! the `cobalt_relay_core::Result` alias.

use crate::connector::ConnectorError;
use crate::node::NodeId;
use std::fmt;

/// Errors raised while executing a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    /// A connector invocation failed (unknown connector or operation
    /// failure). The engine does not retry.
    Connector {
        node_id: NodeId,
        source: ConnectorError,
    },
    /// The workflow has no trigger node to start from.
    ///
    /// The validator reports this before execution; the orchestrator keeps
    /// its own guard so an unvalidated workflow still fails cleanly.
    MissingTrigger,
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connector { node_id, source } => {
                write!(f, "node {node_id} failed: {source}")
            }
            Self::MissingTrigger => write!(f, "workflow has no trigger node"),
        }
    }
}

impl std::error::Error for ExecuteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connector { source, .. } => Some(source),
            Self::MissingTrigger => None,
        }
    }
}
