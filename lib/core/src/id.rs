//! Strongly-typed ID types for domain entities.
//!
//! All IDs wrap a ULID (Universally Unique Lexicographically Sortable
//! Identifier), giving uniqueness plus temporal ordering. Each ID type
//! carries a short display prefix so an ID in a log line is self-describing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around ULID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Creates an ID from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }

            /// Returns the prefix used for display formatting.
            #[must_use]
            pub const fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accept both the prefixed display form and a raw ULID.
                let prefix_with_underscore = concat!($prefix, "_");
                let ulid_str = s.strip_prefix(prefix_with_underscore).unwrap_or(s);

                Ulid::from_str(ulid_str)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        reason: e.to_string(),
                    })
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }

        impl From<$name> for Ulid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a workflow definition.
    WorkflowId,
    "wf"
);

define_id!(
    /// Unique identifier for a single execution (run) of a workflow.
    ExecutionId,
    "run"
);

define_id!(
    /// Unique identifier for a pending approval raised during a run.
    ApprovalId,
    "apr"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_id_display_format() {
        let id = WorkflowId::new();
        assert!(id.to_string().starts_with("wf_"));
    }

    #[test]
    fn execution_id_display_format() {
        let id = ExecutionId::new();
        assert!(id.to_string().starts_with("run_"));
    }

    #[test]
    fn approval_id_display_format() {
        let id = ApprovalId::new();
        assert!(id.to_string().starts_with("apr_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = ExecutionId::new();
        let parsed: ExecutionId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: WorkflowId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let result: Result<ApprovalId, _> = "definitely_not_an_id".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "ApprovalId");
    }

    #[test]
    fn ids_hash_distinctly() {
        use std::collections::HashSet;

        let a = ExecutionId::new();
        let b = ExecutionId::new();

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(a);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = ExecutionId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let parsed: ExecutionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
