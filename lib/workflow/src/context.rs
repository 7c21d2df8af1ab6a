//! Per-run execution state.
//!
//! An [`ExecutionContext`] is created per run and owned exclusively by the
//! orchestrator for the run's duration. Its `variables` map and `logs`
//! sequence grow monotonically: entries are appended, never mutated or
//! removed, which keeps a snapshot safe to read from a caller polling run
//! status. Only the single orchestrator task writes to the context.

use crate::node::NodeId;
use chrono::{DateTime, Utc};
use cobalt_relay_core::{ApprovalId, ExecutionId, WorkflowId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// The overall status of a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Run is actively executing.
    Running,
    /// Walk ended with no pending error or pause.
    Completed,
    /// A node execution raised an error.
    Failed,
    /// An approval node suspended the run; resumable by an external caller.
    Paused,
}

impl ExecutionStatus {
    /// Returns true if this is a terminal state for the current invocation.
    ///
    /// `Paused` counts as terminal here: the engine produces the suspension,
    /// the resumption protocol lives outside this crate.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Severity of an execution log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSeverity {
    Info,
    Success,
    Warning,
    Error,
}

/// One entry in a run's audit trail.
///
/// Entries are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLog {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// The node the entry relates to, if any.
    pub node_id: Option<NodeId>,
    /// Entry severity.
    pub severity: LogSeverity,
    /// Human-readable message.
    pub message: String,
    /// Optional structured payload (node result, error detail).
    pub data: Option<JsonValue>,
}

/// A pending approval synthesized by an approval node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Unique identifier for this approval request.
    pub id: ApprovalId,
    /// The approval node that raised it.
    pub node_id: NodeId,
    /// Who should approve.
    pub approver: String,
    /// Resolved title.
    pub title: String,
    /// Resolved description.
    pub description: String,
    /// When the approval was requested.
    pub requested_at: DateTime<Utc>,
}

/// Mutable state for a single workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// The workflow being executed.
    pub workflow_id: WorkflowId,
    /// Unique identifier for this run.
    pub execution_id: ExecutionId,
    /// The payload that initiated the run; immutable once set.
    pub trigger_data: JsonValue,
    /// Node results keyed by node ID, plus the reserved `trigger` key.
    /// One entry per executed node, read by template resolution for all
    /// subsequent nodes.
    pub variables: HashMap<String, JsonValue>,
    /// Ordered, append-only audit trail.
    pub logs: Vec<ExecutionLog>,
    /// Current run status.
    pub status: ExecutionStatus,
    /// The approval the run is suspended on, if paused.
    pub pending_approval: Option<PendingApproval>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run reached a terminal status.
    pub finished_at: Option<DateTime<Utc>>,
}

/// Reserved variable key holding the trigger payload.
pub const TRIGGER_KEY: &str = "trigger";

impl ExecutionContext {
    /// Creates a context for a new run, seeding the `trigger` variable.
    #[must_use]
    pub fn new(workflow_id: WorkflowId, trigger_data: JsonValue) -> Self {
        let mut variables = HashMap::new();
        variables.insert(TRIGGER_KEY.to_string(), trigger_data.clone());
        Self {
            workflow_id,
            execution_id: ExecutionId::new(),
            trigger_data,
            variables,
            logs: Vec::new(),
            status: ExecutionStatus::Running,
            pending_approval: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records a node's produced result.
    pub fn set_variable(&mut self, key: impl Into<String>, value: JsonValue) {
        self.variables.insert(key.into(), value);
    }

    /// Appends an entry to the audit trail.
    pub fn log(
        &mut self,
        severity: LogSeverity,
        node_id: Option<&NodeId>,
        message: impl Into<String>,
        data: Option<JsonValue>,
    ) {
        self.logs.push(ExecutionLog {
            timestamp: Utc::now(),
            node_id: node_id.cloned(),
            severity,
            message: message.into(),
            data,
        });
    }

    /// Marks the run as completed.
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Marks the run as failed.
    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.finished_at = Some(Utc::now());
    }

    /// Suspends the run on a pending approval.
    pub fn pause(&mut self, approval: PendingApproval) {
        self.status = ExecutionStatus::Paused;
        self.pending_approval = Some(approval);
        self.finished_at = Some(Utc::now());
    }

    /// Returns the most recent log entry, if any.
    #[must_use]
    pub fn last_log(&self) -> Option<&ExecutionLog> {
        self.logs.last()
    }

    /// Returns the duration of the run so far (or total, if finished).
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }
}
