//! Connector boundary for external operations.
//!
//! Connectors are the only point where the engine crosses into
//! untrusted/variable-latency code. The registry of available connectors
//! lives outside this crate; the engine sees an injected [`ConnectorInvoker`]
//! and treats connector names as opaque strings. It does not retry failed
//! invocations and imposes no timeout; resilience layers wrap the engine
//! externally.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Errors from connector invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// No connector is registered under the given name.
    NotFound { connector: String },
    /// The operation was found but failed.
    OperationFailed {
        connector: String,
        operation: String,
        message: String,
    },
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { connector } => write!(f, "connector not found: {connector}"),
            Self::OperationFailed {
                connector,
                operation,
                message,
            } => write!(f, "connector {connector}.{operation} failed: {message}"),
        }
    }
}

impl std::error::Error for ConnectorError {}

/// Trait for invoking named connector operations.
///
/// Implemented by the connector registry collaborator. Injected into the
/// engine rather than looked up ambiently so tests can substitute a fake
/// connector without global state.
#[async_trait]
pub trait ConnectorInvoker: Send + Sync {
    /// Invokes an operation with fully-resolved parameters.
    ///
    /// # Errors
    ///
    /// Returns an error when the connector is unknown or the operation
    /// fails; the engine surfaces either as a node execution failure.
    async fn invoke(
        &self,
        connector: &str,
        operation: &str,
        params: JsonValue,
    ) -> Result<JsonValue, ConnectorError>;
}

/// A connector that echoes its resolved parameters as the result (for
/// testing template resolution end to end).
pub struct EchoConnector;

#[async_trait]
impl ConnectorInvoker for EchoConnector {
    async fn invoke(
        &self,
        _connector: &str,
        _operation: &str,
        params: JsonValue,
    ) -> Result<JsonValue, ConnectorError> {
        Ok(params)
    }
}

/// A connector that can be configured to succeed or fail.
pub struct MockConnector {
    /// If set, all invocations fail with this error.
    pub fail_with: Option<ConnectorError>,
    /// The result to return on success.
    pub result: JsonValue,
}

impl MockConnector {
    /// Creates a mock connector that succeeds with the given result.
    #[must_use]
    pub fn succeeding(result: JsonValue) -> Self {
        Self {
            fail_with: None,
            result,
        }
    }

    /// Creates a mock connector that fails with the given error.
    #[must_use]
    pub fn failing(error: ConnectorError) -> Self {
        Self {
            fail_with: Some(error),
            result: JsonValue::Null,
        }
    }
}

#[async_trait]
impl ConnectorInvoker for MockConnector {
    async fn invoke(
        &self,
        _connector: &str,
        _operation: &str,
        _params: JsonValue,
    ) -> Result<JsonValue, ConnectorError> {
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(self.result.clone()),
        }
    }
}
