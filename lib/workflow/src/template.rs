//! Template resolution for node configuration.
//!
//! Node configuration values may contain `{{dotted.path}}` placeholders in
//! their string leaves. Resolution substitutes each placeholder with the
//! stringified value found by traversing the run's variable namespace
//! (`a.b.c` looks up `variables["a"]["b"]["c"]`).
//!
//! Missing paths resolve to the empty string rather than an error. A
//! workflow with an absent upstream value degrades to blank text instead of
//! aborting; the lookup must not be "fixed" into a throwing one.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Resolves all placeholders in `value` against the variable namespace.
///
/// The shape of the input is preserved: objects and arrays are walked
/// recursively, non-string leaves pass through unchanged, and only string
/// leaves are substituted.
#[must_use]
pub fn resolve(value: &JsonValue, variables: &HashMap<String, JsonValue>) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(resolve_str(s, variables)),
        JsonValue::Array(items) => {
            JsonValue::Array(items.iter().map(|v| resolve(v, variables)).collect())
        }
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve(v, variables)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Resolves placeholders in a single string.
#[must_use]
pub fn resolve_str(template: &str, variables: &HashMap<String, JsonValue>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unterminated placeholder, keep the remainder verbatim.
            break;
        };

        out.push_str(&rest[..open]);
        let path = after_open[..close].trim();
        if let Some(value) = lookup_path(variables, path) {
            out.push_str(&stringify(value));
        }
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Looks up a dotted path in the variable namespace.
///
/// The first segment selects a top-level variable (a node ID or the
/// reserved `trigger` key); remaining segments traverse object keys.
/// Returns `None` when any segment is absent or a non-object is traversed.
#[must_use]
pub fn lookup_path<'a>(
    variables: &'a HashMap<String, JsonValue>,
    path: &str,
) -> Option<&'a JsonValue> {
    let mut segments = path.split('.');
    let mut current = variables.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Stringifies a JSON value for substitution into a string leaf.
///
/// Strings are used as-is (no surrounding quotes); null becomes the empty
/// string; everything else uses its compact JSON form.
#[must_use]
pub fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: JsonValue) -> HashMap<String, JsonValue> {
        value
            .as_object()
            .expect("object")
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn resolves_simple_placeholder() {
        let variables = vars(json!({"trigger": {"name": "Ada"}}));
        assert_eq!(resolve_str("Hello {{trigger.name}}!", &variables), "Hello Ada!");
    }

    #[test]
    fn resolves_deep_path() {
        let variables = vars(json!({"fetch": {"user": {"address": {"city": "Turin"}}}}));
        assert_eq!(resolve_str("{{fetch.user.address.city}}", &variables), "Turin");
    }

    #[test]
    fn missing_path_resolves_to_empty_string() {
        let variables = HashMap::new();
        assert_eq!(resolve_str("{{missing.path}}", &variables), "");
    }

    #[test]
    fn non_string_values_are_stringified() {
        let variables = vars(json!({"calc": {"total": 42, "ok": true}}));
        assert_eq!(
            resolve_str("total={{calc.total}} ok={{calc.ok}}", &variables),
            "total=42 ok=true"
        );
    }

    #[test]
    fn object_value_uses_compact_json() {
        let variables = vars(json!({"fetch": {"user": {"name": "Ada"}}}));
        assert_eq!(resolve_str("{{fetch.user}}", &variables), r#"{"name":"Ada"}"#);
    }

    #[test]
    fn multiple_placeholders_in_one_string() {
        let variables = vars(json!({"a": "1", "b": "2"}));
        assert_eq!(resolve_str("{{a}}-{{b}}-{{a}}", &variables), "1-2-1");
    }

    #[test]
    fn unterminated_placeholder_is_kept_verbatim() {
        let variables = vars(json!({"a": "1"}));
        assert_eq!(resolve_str("{{a}} and {{broken", &variables), "1 and {{broken");
    }

    #[test]
    fn resolve_recurses_through_nested_structures() {
        let variables = vars(json!({"trigger": {"id": 7, "tag": "urgent"}}));
        let config = json!({
            "items": [
                {"label": "id={{trigger.id}}"},
                {"label": "tag={{trigger.tag}}", "fixed": 3}
            ],
            "count": 2
        });

        let resolved = resolve(&config, &variables);
        assert_eq!(resolved["items"][0]["label"], "id=7");
        assert_eq!(resolved["items"][1]["label"], "tag=urgent");
        assert_eq!(resolved["items"][1]["fixed"], 3);
        assert_eq!(resolved["count"], 2);
    }

    #[test]
    fn resolve_is_identity_without_placeholders() {
        let variables = vars(json!({"a": "unused"}));
        let config = json!({"nested": {"num": 1.5, "flag": false, "list": [1, 2, 3]}});
        assert_eq!(resolve(&config, &variables), config);
    }

    #[test]
    fn traversal_through_non_object_stops() {
        let variables = vars(json!({"a": {"b": "leaf"}}));
        assert_eq!(resolve_str("{{a.b.c}}", &variables), "");
    }
}
