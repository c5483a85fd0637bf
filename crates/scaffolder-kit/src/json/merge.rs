//! Deep merge of JSON trees with a pluggable conflict strategy

use serde_json::{Map, Value};

/// Separator between two commands that must run in sequence and stop on
/// the first failure
pub const SCRIPT_SEPARATOR: &str = " && ";

/// Decides how an existing and an incoming value at the same path combine.
///
/// Returning `None` falls back to the default merge: objects merge key by
/// key, everything else is overwritten by the incoming value.
pub trait MergeStrategy {
    fn merge(&self, existing: &Value, incoming: &Value) -> Option<Value>;
}

impl<F> MergeStrategy for F
where
    F: Fn(&Value, &Value) -> Option<Value>,
{
    fn merge(&self, existing: &Value, incoming: &Value) -> Option<Value> {
        self(existing, incoming)
    }
}

/// Concatenates arrays, existing items first
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatArrays;

impl MergeStrategy for ConcatArrays {
    fn merge(&self, existing: &Value, incoming: &Value) -> Option<Value> {
        match (existing, incoming) {
            (Value::Array(existing), Value::Array(incoming)) => Some(Value::Array(
                existing.iter().chain(incoming.iter()).cloned().collect(),
            )),
            _ => None,
        }
    }
}

/// Joins two commands as `existing && incoming`
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendScript;

impl MergeStrategy for AppendScript {
    fn merge(&self, existing: &Value, incoming: &Value) -> Option<Value> {
        match (existing, incoming) {
            (Value::String(existing), Value::String(incoming)) => Some(Value::String(format!(
                "{}{}{}",
                existing, SCRIPT_SEPARATOR, incoming
            ))),
            _ => None,
        }
    }
}

/// Joins two commands as `incoming && existing`
#[derive(Debug, Clone, Copy, Default)]
pub struct PrependScript;

impl MergeStrategy for PrependScript {
    fn merge(&self, existing: &Value, incoming: &Value) -> Option<Value> {
        match (existing, incoming) {
            (Value::String(existing), Value::String(incoming)) => Some(Value::String(format!(
                "{}{}{}",
                incoming, SCRIPT_SEPARATOR, existing
            ))),
            _ => None,
        }
    }
}

/// Strategy used when adding scripts
pub fn script_strategy(prepend: bool) -> &'static dyn MergeStrategy {
    if prepend {
        &PrependScript
    } else {
        &AppendScript
    }
}

/// Merge `source` into `target` key by key, consulting `strategy` for every
/// key present on both sides.
///
/// Keys missing from `target` are appended in `source` order; existing keys
/// keep their position.
pub fn merge_into(
    target: &mut Map<String, Value>,
    source: &Map<String, Value>,
    strategy: &dyn MergeStrategy,
) {
    for (key, incoming) in source {
        match target.get_mut(key) {
            Some(existing) => match strategy.merge(existing, incoming) {
                Some(merged) => *existing = merged,
                None => deep_merge(existing, incoming, strategy),
            },
            None => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Default merge of `incoming` into `existing`: objects recurse through
/// [`merge_into`], any other combination takes the incoming value
pub fn deep_merge(existing: &mut Value, incoming: &Value, strategy: &dyn MergeStrategy) {
    match (existing, incoming) {
        (Value::Object(target), Value::Object(source)) => merge_into(target, source, strategy),
        (existing, incoming) => *existing = incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(mut existing: Value, incoming: Value, strategy: &dyn MergeStrategy) -> Value {
        deep_merge(&mut existing, &incoming, strategy);
        existing
    }

    #[test]
    fn test_concat_arrays_keeps_existing_first() {
        let result = merged(json!({"a": [3, 4]}), json!({"a": [1, 2]}), &ConcatArrays);
        assert_eq!(result, json!({"a": [3, 4, 1, 2]}));
    }

    #[test]
    fn test_objects_merge_key_by_key() {
        let result = merged(json!({"a": {"y": 2}}), json!({"a": {"x": 1}}), &ConcatArrays);
        assert_eq!(result, json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_new_keys_are_appended_in_order() {
        let result = merged(
            json!({"name": "lib", "version": "1.0.0"}),
            json!({"main": "index.js", "name": "lib2"}),
            &ConcatArrays,
        );
        let keys: Vec<&str> = result.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "version", "main"]);
        assert_eq!(result["name"], "lib2");
    }

    #[test]
    fn test_scalars_and_mismatched_kinds_are_overwritten() {
        let result = merged(
            json!({"a": 1, "b": [1], "c": {"x": 1}}),
            json!({"a": "one", "b": {"k": true}, "c": null}),
            &ConcatArrays,
        );
        assert_eq!(result, json!({"a": "one", "b": {"k": true}, "c": null}));
    }

    #[test]
    fn test_nested_arrays_concatenate() {
        let result = merged(
            json!({"compilerOptions": {"lib": ["es2020"]}, "include": ["src"]}),
            json!({"compilerOptions": {"lib": ["dom"]}, "include": ["test"]}),
            &ConcatArrays,
        );
        assert_eq!(
            result,
            json!({"compilerOptions": {"lib": ["es2020", "dom"]}, "include": ["src", "test"]})
        );
    }

    #[test]
    fn test_script_strategies() {
        assert_eq!(
            merged(json!({"build": "lint"}), json!({"build": "tsc"}), &AppendScript),
            json!({"build": "lint && tsc"})
        );
        assert_eq!(
            merged(json!({"build": "lint"}), json!({"build": "tsc"}), &PrependScript),
            json!({"build": "tsc && lint"})
        );
    }

    #[test]
    fn test_script_strategy_selection() {
        let append = script_strategy(false).merge(&json!("a"), &json!("b"));
        let prepend = script_strategy(true).merge(&json!("a"), &json!("b"));
        assert_eq!(append, Some(json!("a && b")));
        assert_eq!(prepend, Some(json!("b && a")));
    }

    #[test]
    fn test_script_strategy_without_arrays_overwrites_them() {
        let result = merged(json!({"files": ["a"]}), json!({"files": ["b"]}), &AppendScript);
        assert_eq!(result, json!({"files": ["b"]}));
    }

    #[test]
    fn test_closure_strategy() {
        let keep_existing = |existing: &Value, _: &Value| Some(existing.clone());
        let result = merged(json!({"a": 1}), json!({"a": 2, "b": 3}), &keep_existing);
        assert_eq!(result, json!({"a": 1, "b": 3}));
    }
}
