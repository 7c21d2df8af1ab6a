//! Workflow node types and configurations.
//!
//! Nodes are the building blocks of workflows. Each node has:
//! - A unique, author-chosen string ID within the workflow
//! - A kind (trigger, action, condition, approval, AI decision)
//! - Configuration specific to its kind
//!
//! Nodes are created at authoring time and never mutated during a run;
//! the engine only reads them.

use crate::condition::ConditionRule;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A unique identifier for a node within a workflow.
///
/// Node IDs are author-chosen strings (e.g. `"send_email"`), not generated
/// ULIDs: template placeholders and the run's variable namespace reference
/// nodes by this ID, so it needs to be human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node ID from the given string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The single entry point that initiates workflow execution.
    Trigger,
    /// A connector operation with templated parameters.
    Action,
    /// A predicate over the run's variables, used for branching.
    Condition,
    /// A human approval gate that suspends the run.
    Approval,
    /// An AI-backed decision producing a structured verdict.
    AiDecision,
}

/// Configuration for a node, varying by kind.
///
/// The kind tag is part of the serialized form, so a node on the wire looks
/// like `{"id": "...", "name": "...", "type": "action", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeConfig {
    /// Trigger nodes carry no configuration; the trigger payload is supplied
    /// by the caller at execution time.
    Trigger,
    /// An external connector operation.
    Action {
        /// The connector providing the operation (opaque to the engine).
        connector: String,
        /// The operation identifier within that connector.
        operation: String,
        /// Operation parameters; string leaves may contain `{{path}}`
        /// placeholders resolved against the run's variables.
        params: JsonValue,
    },
    /// A conjunction of comparison rules over the run's variables.
    Condition {
        /// All rules must hold for the node to produce `true`.
        rules: Vec<ConditionRule>,
    },
    /// A human approval gate.
    Approval {
        /// Who should approve (opaque routing hint for the caller).
        approver: String,
        /// Title shown to the approver; may contain placeholders.
        title: String,
        /// Description shown to the approver; may contain placeholders.
        description: String,
    },
    /// An AI-backed decision, invoked through a connector.
    AiDecision {
        /// The connector providing the decision operation.
        connector: String,
        /// The operation identifier within that connector.
        operation: String,
        /// Decision context; string leaves may contain placeholders.
        context: JsonValue,
    },
}

impl NodeConfig {
    /// Returns the kind of this node configuration.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Trigger => NodeKind::Trigger,
            Self::Action { .. } => NodeKind::Action,
            Self::Condition { .. } => NodeKind::Condition,
            Self::Approval { .. } => NodeKind::Approval,
            Self::AiDecision { .. } => NodeKind::AiDecision,
        }
    }
}

/// A workflow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node within the workflow.
    pub id: NodeId,
    /// Human-readable name for this node.
    pub name: String,
    /// Node configuration (determines kind and behavior).
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl Node {
    /// Creates a new node with the given ID and configuration.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, config: NodeConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
        }
    }

    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }
}
