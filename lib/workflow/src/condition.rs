//! Condition evaluation for branching.
//!
//! A condition node carries a list of rules, each comparing a resolved
//! variable against an expected value. The node produces `true` only when
//! every rule holds (logical AND); OR semantics are expressed as parallel
//! branches in the graph, not at the node level.
//!
//! Evaluation is deliberately permissive: comparisons are loose (the string
//! `"5"` equals the number `5`), string operators are case-insensitive, and
//! an unknown operator evaluates to `false` rather than raising an error.

use crate::template::stringify;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A comparison operator.
///
/// Serde aliases accept both the symbolic and the spelled-out forms used in
/// authored workflows (`">"` and `"greater_than"` are the same operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Loose equality.
    #[serde(alias = "==")]
    Equals,
    /// Loose inequality.
    #[serde(alias = "!=")]
    NotEquals,
    /// Numeric comparison when both operands are numeric, lexicographic
    /// otherwise.
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = ">=", alias = "greater_than_or_equal")]
    GreaterOrEqual,
    #[serde(alias = "<")]
    LessThan,
    #[serde(alias = "<=", alias = "less_than_or_equal")]
    LessOrEqual,
    /// Case-insensitive substring test.
    Contains,
    NotContains,
    /// Case-insensitive prefix test.
    StartsWith,
    /// Case-insensitive suffix test.
    EndsWith,
    /// Any unrecognized operator; always evaluates to `false`.
    #[serde(other)]
    Unknown,
}

/// A single comparison rule within a condition node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    /// Dotted path into the run's variables (e.g. `"trigger.amount"`).
    pub field: String,
    /// The comparison operator.
    pub operator: ConditionOperator,
    /// The expected value to compare against.
    pub value: JsonValue,
}

/// Evaluates a single comparison.
///
/// Never fails: malformed operands fall back to stringified comparison and
/// unknown operators evaluate to `false`.
#[must_use]
pub fn evaluate(actual: &JsonValue, operator: ConditionOperator, expected: &JsonValue) -> bool {
    match operator {
        ConditionOperator::Equals => loose_eq(actual, expected),
        ConditionOperator::NotEquals => !loose_eq(actual, expected),
        ConditionOperator::GreaterThan => compare(actual, expected, |o| o.is_gt()),
        ConditionOperator::GreaterOrEqual => compare(actual, expected, |o| o.is_ge()),
        ConditionOperator::LessThan => compare(actual, expected, |o| o.is_lt()),
        ConditionOperator::LessOrEqual => compare(actual, expected, |o| o.is_le()),
        ConditionOperator::Contains => {
            lowercase(actual).contains(&lowercase(expected))
        }
        ConditionOperator::NotContains => {
            !lowercase(actual).contains(&lowercase(expected))
        }
        ConditionOperator::StartsWith => {
            lowercase(actual).starts_with(&lowercase(expected))
        }
        ConditionOperator::EndsWith => {
            lowercase(actual).ends_with(&lowercase(expected))
        }
        ConditionOperator::Unknown => false,
    }
}

/// Loose equality: numeric when both operands coerce to numbers, boolean
/// against `"true"`/`"false"` strings, stringified comparison otherwise.
fn loose_eq(a: &JsonValue, b: &JsonValue) -> bool {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x == y;
    }
    stringify(a) == stringify(b)
}

/// Ordering comparison; numeric when both operands coerce, lexicographic on
/// the stringified operands otherwise.
fn compare(a: &JsonValue, b: &JsonValue, check: impl Fn(std::cmp::Ordering) -> bool) -> bool {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x.partial_cmp(&y).is_some_and(check);
    }
    check(stringify(a).cmp(&stringify(b)))
}

/// Coerces a value to a number, accepting numeric strings.
fn as_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lowercase(value: &JsonValue) -> String {
    stringify(value).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_equality_across_types() {
        assert!(evaluate(&json!("5"), ConditionOperator::Equals, &json!(5)));
        assert!(evaluate(&json!(5), ConditionOperator::Equals, &json!("5")));
        assert!(evaluate(&json!(true), ConditionOperator::Equals, &json!("true")));
        assert!(!evaluate(&json!("5"), ConditionOperator::Equals, &json!(6)));
    }

    #[test]
    fn not_equals_negates() {
        assert!(evaluate(&json!("a"), ConditionOperator::NotEquals, &json!("b")));
        assert!(!evaluate(&json!("5"), ConditionOperator::NotEquals, &json!(5)));
    }

    #[test]
    fn numeric_ordering() {
        assert!(evaluate(&json!(150), ConditionOperator::GreaterThan, &json!(100)));
        assert!(!evaluate(&json!(50), ConditionOperator::GreaterThan, &json!(100)));
        assert!(evaluate(&json!("9"), ConditionOperator::LessThan, &json!("10")));
        assert!(evaluate(&json!(100), ConditionOperator::GreaterOrEqual, &json!(100)));
        assert!(evaluate(&json!(100), ConditionOperator::LessOrEqual, &json!(100)));
    }

    #[test]
    fn lexicographic_ordering_fallback() {
        assert!(evaluate(&json!("beta"), ConditionOperator::GreaterThan, &json!("alpha")));
        assert!(evaluate(&json!("alpha"), ConditionOperator::LessThan, &json!("beta")));
    }

    #[test]
    fn contains_is_case_insensitive() {
        assert!(evaluate(
            &json!("Urgent: server down"),
            ConditionOperator::Contains,
            &json!("URGENT")
        ));
        assert!(evaluate(
            &json!("all good"),
            ConditionOperator::NotContains,
            &json!("urgent")
        ));
    }

    #[test]
    fn prefix_and_suffix_are_case_insensitive() {
        assert!(evaluate(
            &json!("Re: invoice"),
            ConditionOperator::StartsWith,
            &json!("re:")
        ));
        assert!(evaluate(
            &json!("report.PDF"),
            ConditionOperator::EndsWith,
            &json!(".pdf")
        ));
    }

    #[test]
    fn unknown_operator_is_false() {
        assert!(!evaluate(&json!(1), ConditionOperator::Unknown, &json!(1)));
    }

    #[test]
    fn operator_deserializes_symbolic_aliases() {
        let op: ConditionOperator = serde_json::from_value(json!(">")).expect("deserialize");
        assert_eq!(op, ConditionOperator::GreaterThan);
        let op: ConditionOperator = serde_json::from_value(json!("==")).expect("deserialize");
        assert_eq!(op, ConditionOperator::Equals);
        let op: ConditionOperator =
            serde_json::from_value(json!("not_equals")).expect("deserialize");
        assert_eq!(op, ConditionOperator::NotEquals);
    }

    #[test]
    fn unrecognized_operator_deserializes_to_unknown() {
        let op: ConditionOperator =
            serde_json::from_value(json!("matches_regex")).expect("deserialize");
        assert_eq!(op, ConditionOperator::Unknown);
    }

    #[test]
    fn rule_serde_roundtrip() {
        let rule = ConditionRule {
            field: "trigger.amount".to_string(),
            operator: ConditionOperator::GreaterThan,
            value: json!(100),
        };
        let json = serde_json::to_string(&rule).expect("serialize");
        let parsed: ConditionRule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, rule);
    }
}
