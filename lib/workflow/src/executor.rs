//! Single-node execution.
//!
//! Dispatches a node to its handler based on the typed configuration,
//! resolving templated parameters against the run's variables and crossing
//! the connector boundary for action and AI-decision nodes. Every dispatch
//! appends an "entering node" log before execution and a result or failure
//! log after, so the audit trail records each step even on failure.

use crate::condition;
use crate::connector::ConnectorInvoker;
use crate::context::{ExecutionContext, LogSeverity, PendingApproval};
use crate::error::ExecuteError;
use crate::node::{Node, NodeConfig};
use crate::template;
use chrono::Utc;
use cobalt_relay_core::ApprovalId;
use serde_json::{Value as JsonValue, json};
use tracing::debug;

/// Executes a single node, returning its produced result.
///
/// The result is also what the walker matches branch conditions against.
/// The orchestrator stores it in the context's variables under the node's
/// ID after this returns.
///
/// # Errors
///
/// Returns an error when a connector invocation fails; the failure is
/// already logged at error severity when this returns.
pub async fn execute_node<C: ConnectorInvoker + ?Sized>(
    node: &Node,
    ctx: &mut ExecutionContext,
    invoker: &C,
) -> Result<JsonValue, ExecuteError> {
    ctx.log(
        LogSeverity::Info,
        Some(&node.id),
        format!("entering node '{}'", node.name),
        None,
    );
    debug!(node_id = %node.id, kind = ?node.kind(), "executing node");

    let outcome = match &node.config {
        NodeConfig::Trigger => {
            let result = ctx.trigger_data.clone();
            ctx.log(
                LogSeverity::Success,
                Some(&node.id),
                "trigger activated",
                None,
            );
            return Ok(result);
        }
        NodeConfig::Action {
            connector,
            operation,
            params,
        } => {
            let resolved = template::resolve(params, &ctx.variables);
            invoker.invoke(connector, operation, resolved).await
        }
        NodeConfig::Condition { rules } => {
            let mut satisfied = true;
            for rule in rules {
                let actual = template::lookup_path(&ctx.variables, &rule.field)
                    .cloned()
                    .unwrap_or(JsonValue::Null);
                if !condition::evaluate(&actual, rule.operator, &rule.value) {
                    satisfied = false;
                    break;
                }
            }
            Ok(JsonValue::Bool(satisfied))
        }
        NodeConfig::Approval {
            approver,
            title,
            description,
        } => {
            let approval = PendingApproval {
                id: ApprovalId::new(),
                node_id: node.id.clone(),
                approver: approver.clone(),
                title: template::resolve_str(title, &ctx.variables),
                description: template::resolve_str(description, &ctx.variables),
                requested_at: Utc::now(),
            };
            let record = serde_json::to_value(&approval).unwrap_or(JsonValue::Null);
            ctx.log(
                LogSeverity::Warning,
                Some(&node.id),
                format!("awaiting approval from {}", approval.approver),
                Some(record.clone()),
            );
            ctx.pause(approval);
            return Ok(record);
        }
        NodeConfig::AiDecision {
            connector,
            operation,
            context,
        } => {
            let resolved = template::resolve(context, &ctx.variables);
            invoker
                .invoke(connector, operation, resolved)
                .await
                .map(normalize_verdict)
        }
    };

    match outcome {
        Ok(result) => {
            ctx.log(
                LogSeverity::Success,
                Some(&node.id),
                format!("node '{}' completed", node.name),
                Some(result.clone()),
            );
            Ok(result)
        }
        Err(source) => {
            ctx.log(
                LogSeverity::Error,
                Some(&node.id),
                format!("node '{}' failed: {source}", node.name),
                Some(json!({"error": source.to_string()})),
            );
            Err(ExecuteError::Connector {
                node_id: node.id.clone(),
                source,
            })
        }
    }
}

/// Normalizes a connector's decision result into a structured verdict.
///
/// Objects contribute their `decision`, `confidence`, `explanation` and
/// (when present) `factors` fields; a bare string becomes the decision
/// label; anything else yields an `unknown` verdict.
fn normalize_verdict(raw: JsonValue) -> JsonValue {
    match raw {
        JsonValue::Object(map) => {
            let mut verdict = json!({
                "decision": map.get("decision").cloned().unwrap_or(json!("unknown")),
                "confidence": map.get("confidence").cloned().unwrap_or(json!(0.0)),
                "explanation": map.get("explanation").cloned().unwrap_or(json!("")),
            });
            if let Some(factors) = map.get("factors") {
                verdict["factors"] = factors.clone();
            }
            verdict
        }
        JsonValue::String(label) => json!({
            "decision": label,
            "confidence": 0.0,
            "explanation": "",
        }),
        _ => json!({
            "decision": "unknown",
            "confidence": 0.0,
            "explanation": "",
        }),
    }
}
