//! Connection types for workflow graphs.
//!
//! Connections are directed edges between nodes. A connection may carry a
//! condition tag that gates whether it is followed at a branch point; an
//! absent tag means the connection is unconditional.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge between two workflow nodes.
///
/// At a branch point the walker evaluates connections in declaration order
/// and follows the first one whose condition tag matches the source node's
/// result (see [`crate::orchestrator`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection within the workflow.
    pub id: String,
    /// The source node ID.
    pub from: NodeId,
    /// The target node ID.
    pub to: NodeId,
    /// Optional condition tag (`"true"`, `"false"`, `"approved"`,
    /// `"rejected"`). `None` means unconditional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Connection {
    /// Creates a new unconditional connection.
    #[must_use]
    pub fn new(id: impl Into<String>, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            condition: None,
        }
    }

    /// Sets the condition tag on this connection.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}
