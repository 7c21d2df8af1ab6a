//! Workflow orchestration: the run loop and graph walker.
//!
//! One engine invocation executes one run, strictly sequentially: a single
//! node at a time, no parallel branches. The only asynchronous boundary is
//! the connector invocation inside action and AI-decision nodes. A run
//! proceeds until there is no next node (completed), a node fails (failed),
//! or an approval suspends it (paused).
//!
//! Branch selection uses a fixed condition-tag vocabulary: `"true"` and
//! `"approved"` match a boolean `true` result or an `approved: true` field;
//! `"false"` and `"rejected"` match the negated forms; an absent tag always
//! matches; anything else never matches. The first matching connection in
//! declaration order wins, and a node with outgoing connections but no
//! match is a dead end, not an error.

use crate::connection::Connection;
use crate::connector::ConnectorInvoker;
use crate::context::{ExecutionContext, ExecutionStatus, LogSeverity};
use crate::definition::Workflow;
use crate::error::ExecuteError;
use crate::executor::execute_node;
use crate::node::{Node, NodeId};
use crate::validator::{self, ValidationReport};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// The workflow execution engine.
///
/// Holds the injected connector invoker; carries no per-run state, so one
/// engine can serve many concurrent runs, each with its own
/// [`ExecutionContext`].
pub struct Engine<C: ConnectorInvoker> {
    invoker: C,
}

impl<C: ConnectorInvoker> Engine<C> {
    /// Creates an engine backed by the given connector invoker.
    pub fn new(invoker: C) -> Self {
        Self { invoker }
    }

    /// Statically validates a workflow without executing it.
    #[must_use]
    pub fn validate(&self, workflow: &Workflow) -> ValidationReport {
        validator::validate(workflow)
    }

    /// Executes a workflow from its trigger node to completion, failure,
    /// or suspension, returning the run's full context.
    ///
    /// The returned context always carries the complete audit trail up to
    /// the point the run stopped; a failed run shows exactly which node
    /// failed and why, a paused run carries its pending approval.
    #[instrument(skip_all, fields(workflow_id = %workflow.id))]
    pub async fn execute(&self, workflow: &Workflow, trigger_data: JsonValue) -> ExecutionContext {
        let mut ctx = ExecutionContext::new(workflow.id, trigger_data);
        debug!(execution_id = %ctx.execution_id, "starting run");

        let Some(trigger) = workflow.trigger_node() else {
            ctx.log(
                LogSeverity::Error,
                None,
                ExecuteError::MissingTrigger.to_string(),
                None,
            );
            ctx.fail();
            return ctx;
        };

        // Runtime safety net under the static cycle check: a revisit stops
        // the walk instead of looping.
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = Some(trigger);

        while let Some(node) = current {
            if !visited.insert(node.id.clone()) {
                warn!(node_id = %node.id, "revisited node, stopping walk");
                ctx.log(
                    LogSeverity::Warning,
                    Some(&node.id),
                    format!("node '{}' already visited in this run, stopping", node.id),
                    None,
                );
                break;
            }

            let result = match execute_node(node, &mut ctx, &self.invoker).await {
                Ok(result) => result,
                Err(_) => {
                    // Already logged at error severity by the executor.
                    ctx.fail();
                    return ctx;
                }
            };
            ctx.set_variable(node.id.as_str(), result.clone());

            if ctx.status == ExecutionStatus::Paused {
                return ctx;
            }

            current = next_node(workflow, &node.id, &result);
        }

        if ctx.status == ExecutionStatus::Running {
            ctx.complete();
        }
        ctx
    }
}

/// Selects the next node: the target of the first connection (in
/// declaration order) out of `from` whose condition matches `result`.
fn next_node<'a>(workflow: &'a Workflow, from: &NodeId, result: &JsonValue) -> Option<&'a Node> {
    workflow
        .connections_from(from)
        .find(|c| connection_matches(c, result))
        .and_then(|c| workflow.node(&c.to))
}

/// Whether a connection's condition tag matches a node result.
fn connection_matches(connection: &Connection, result: &JsonValue) -> bool {
    match connection.condition.as_deref() {
        None => true,
        Some("true") | Some("approved") => is_affirmative(result),
        Some("false") | Some("rejected") => is_negative(result),
        Some(_) => false,
    }
}

fn is_affirmative(result: &JsonValue) -> bool {
    result == &JsonValue::Bool(true) || result.get("approved") == Some(&JsonValue::Bool(true))
}

fn is_negative(result: &JsonValue) -> bool {
    result == &JsonValue::Bool(false) || result.get("approved") == Some(&JsonValue::Bool(false))
}
