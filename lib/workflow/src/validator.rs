//! Static workflow validation.
//!
//! A pre-flight, side-effect-free check run before execution. All problems
//! are collected into one report rather than short-circuiting, so a single
//! call surfaces every structural error at once:
//!
//! - exactly one trigger node,
//! - no duplicate node IDs,
//! - every connection endpoint resolves to an existing node,
//! - no cycle reachable from the trigger.
//!
//! Cycle detection walks depth-first from the trigger; a back-edge to a
//! node still on the traversal stack is a cycle. Orphan cycles that the
//! trigger cannot reach are not traversed and therefore not flagged — an
//! accepted limitation, since the walker never enters them either.

use crate::definition::Workflow;
use crate::node::{NodeId, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Control, DfsEvent, depth_first_search};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Result of validating a workflow.
///
/// An invalid workflow is a normal, fully-reported outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no problems were found.
    pub valid: bool,
    /// Every problem found, in check order.
    pub errors: Vec<String>,
}

/// Validates a workflow's structural integrity.
#[must_use]
pub fn validate(workflow: &Workflow) -> ValidationReport {
    let mut errors = Vec::new();

    let trigger_count = workflow
        .nodes
        .iter()
        .filter(|n| n.kind() == NodeKind::Trigger)
        .count();
    match trigger_count {
        0 => errors.push("workflow has no trigger node".to_string()),
        1 => {}
        n => errors.push(format!(
            "workflow has {n} trigger nodes; exactly one is required"
        )),
    }

    let mut seen: HashSet<&NodeId> = HashSet::new();
    for node in &workflow.nodes {
        if !seen.insert(&node.id) {
            errors.push(format!("duplicate node id: {}", node.id));
        }
    }

    for connection in &workflow.connections {
        if workflow.node(&connection.from).is_none() {
            errors.push(format!(
                "connection {} references unknown source node: {}",
                connection.id, connection.from
            ));
        }
        if workflow.node(&connection.to).is_none() {
            errors.push(format!(
                "connection {} references unknown target node: {}",
                connection.id, connection.to
            ));
        }
    }

    if let Some(trigger) = workflow.trigger_node()
        && let Some((from, to)) = find_reachable_cycle(workflow, &trigger.id)
    {
        errors.push(format!(
            "cycle detected: connection from node {from} back to node {to}"
        ));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Searches for a cycle reachable from `start`, returning the back-edge's
/// endpoints if one exists.
fn find_reachable_cycle(workflow: &Workflow, start: &NodeId) -> Option<(NodeId, NodeId)> {
    let mut graph: DiGraph<&NodeId, ()> = DiGraph::new();
    let mut indices: HashMap<&NodeId, NodeIndex> = HashMap::new();

    for node in &workflow.nodes {
        indices.insert(&node.id, graph.add_node(&node.id));
    }
    for connection in &workflow.connections {
        // Dangling endpoints are reported separately; skip them here.
        if let (Some(&from), Some(&to)) =
            (indices.get(&connection.from), indices.get(&connection.to))
        {
            graph.add_edge(from, to, ());
        }
    }

    let outcome = depth_first_search(&graph, Some(indices[start]), |event| match event {
        DfsEvent::BackEdge(from, to) => Control::Break((from, to)),
        _ => Control::Continue,
    });

    match outcome {
        Control::Break((from, to)) => Some((graph[from].clone(), graph[to].clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connection;
    use crate::node::{Node, NodeConfig};
    use serde_json::json;

    fn trigger(id: &str) -> Node {
        Node::new(id, id, NodeConfig::Trigger)
    }

    fn action(id: &str) -> Node {
        Node::new(
            id,
            id,
            NodeConfig::Action {
                connector: "echo".to_string(),
                operation: "echo".to_string(),
                params: json!({}),
            },
        )
    }

    #[test]
    fn valid_linear_workflow_passes() {
        let mut wf = Workflow::new("Valid");
        wf.add_node(trigger("start"));
        wf.add_node(action("a"));
        wf.add_node(action("b"));
        wf.add_connection(Connection::new("c1", "start", "a"));
        wf.add_connection(Connection::new("c2", "a", "b"));

        let report = validate(&wf);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn missing_trigger_is_reported() {
        let mut wf = Workflow::new("No trigger");
        wf.add_node(action("a"));

        let report = validate(&wf);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e == "workflow has no trigger node"));
    }

    #[test]
    fn multiple_triggers_are_reported_distinctly() {
        let mut wf = Workflow::new("Two triggers");
        wf.add_node(trigger("start1"));
        wf.add_node(trigger("start2"));

        let report = validate(&wf);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("2 trigger nodes"))
        );
    }

    #[test]
    fn duplicate_node_ids_are_reported() {
        let mut wf = Workflow::new("Duplicates");
        wf.add_node(trigger("start"));
        wf.add_node(action("a"));
        wf.add_node(action("a"));

        let report = validate(&wf);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e == "duplicate node id: a"));
    }

    #[test]
    fn dangling_endpoints_are_both_reported() {
        let mut wf = Workflow::new("Dangling");
        wf.add_node(trigger("start"));
        wf.add_connection(Connection::new("c1", "ghost", "phantom"));

        let report = validate(&wf);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("unknown source node: ghost")));
        assert!(report.errors.iter().any(|e| e.contains("unknown target node: phantom")));
    }

    #[test]
    fn reachable_cycle_is_rejected() {
        let mut wf = Workflow::new("Cycle");
        wf.add_node(trigger("start"));
        wf.add_node(action("a"));
        wf.add_node(action("b"));
        wf.add_connection(Connection::new("c1", "start", "a"));
        wf.add_connection(Connection::new("c2", "a", "b"));
        wf.add_connection(Connection::new("c3", "b", "a"));

        let report = validate(&wf);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("cycle detected")));
    }

    #[test]
    fn orphan_self_loop_is_accepted() {
        // The orphan's cycle is unreachable from the trigger, so it is not
        // traversed and not flagged.
        let mut wf = Workflow::new("Orphan loop");
        wf.add_node(trigger("start"));
        wf.add_node(action("a"));
        wf.add_node(action("orphan"));
        wf.add_connection(Connection::new("c1", "start", "a"));
        wf.add_connection(Connection::new("c2", "orphan", "orphan"));

        let report = validate(&wf);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn all_problems_surface_in_one_report() {
        let mut wf = Workflow::new("Everything wrong");
        wf.add_node(action("a"));
        wf.add_node(action("a"));
        wf.add_connection(Connection::new("c1", "a", "ghost"));

        let report = validate(&wf);
        assert!(!report.valid);
        // Missing trigger, duplicate id, dangling target: three problems.
        assert_eq!(report.errors.len(), 3);
    }
}
