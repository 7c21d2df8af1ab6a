//! Workflow execution engine for the cobalt-relay platform.
//!
//! This crate takes a declarative graph of triggers, actions, conditions,
//! approvals, and AI decisions and runs it to completion, a failure, or a
//! suspension point:
//!
//! - **Data Model**: nodes with typed configurations, conditional
//!   connections, workflow definitions
//! - **Template Resolver**: `{{dotted.path}}` substitution against a run's
//!   variable namespace
//! - **Condition Evaluator**: loose comparison predicates for branching
//! - **Connector Boundary**: injected trait for external operations
//! - **Validator**: pre-flight structural checks and cycle detection
//! - **Orchestrator**: the sequential run loop and graph walker
//!
//! A run is single-threaded and owns its [`ExecutionContext`]; independent
//! runs may execute concurrently with no shared state.

pub mod condition;
pub mod connection;
pub mod connector;
pub mod context;
pub mod definition;
pub mod error;
pub mod executor;
pub mod node;
pub mod orchestrator;
pub mod template;
pub mod validator;

pub use condition::{ConditionOperator, ConditionRule};
pub use connection::Connection;
pub use connector::{ConnectorError, ConnectorInvoker, EchoConnector, MockConnector};
pub use context::{
    ExecutionContext, ExecutionLog, ExecutionStatus, LogSeverity, PendingApproval,
};
pub use definition::Workflow;
pub use error::ExecuteError;
pub use node::{Node, NodeConfig, NodeId, NodeKind};
pub use orchestrator::Engine;
pub use validator::{ValidationReport, validate};
