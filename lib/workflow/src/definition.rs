//! Workflow definition types.
//!
//! A workflow is a named automation graph: a set of nodes and the directed,
//! optionally-conditional connections between them. Definitions are produced
//! outside this crate (graph editor or natural-language authoring) and are
//! treated as immutable input by the engine.

use crate::connection::Connection;
use crate::node::{Node, NodeId, NodeKind};
use cobalt_relay_core::WorkflowId;
use serde::{Deserialize, Serialize};

/// A complete workflow definition.
///
/// Nodes and connections are stored in declaration order; the walker relies
/// on connection order at branch points (first matching connection wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for this workflow.
    pub id: WorkflowId,
    /// Human-readable name.
    pub name: String,
    /// The workflow's nodes.
    pub nodes: Vec<Node>,
    /// The directed connections between nodes.
    pub connections: Vec<Connection>,
}

impl Workflow {
    /// Creates a new empty workflow with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WorkflowId::new(),
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Creates a workflow with a specific ID.
    #[must_use]
    pub fn with_id(id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Adds a node to the workflow.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Adds a connection to the workflow.
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Returns the node with the given ID, if any.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Returns the trigger node, if the workflow has exactly one candidate.
    ///
    /// When a malformed workflow carries several trigger nodes the first in
    /// declaration order is returned; the validator reports the cardinality
    /// violation before execution.
    #[must_use]
    pub fn trigger_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind() == NodeKind::Trigger)
    }

    /// Returns the outgoing connections of a node, in declaration order.
    pub fn connections_from(&self, id: &NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| &c.from == id)
    }
}
