//! Operations on the `scripts` section of a package manifest

use crate::json::{merge_into, script_strategy};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const SCRIPTS_KEY: &str = "scripts";

/// Merge `scripts` into the manifest's scripts section.
///
/// A script that already exists is chained with the new command:
/// `existing && new`, or `new && existing` when `prepend` is set.
pub fn add_scripts(manifest: &mut Map<String, Value>, scripts: &Map<String, Value>, prepend: bool) {
    let mut source = Map::new();
    source.insert(SCRIPTS_KEY.to_string(), Value::Object(scripts.clone()));
    merge_into(manifest, &source, script_strategy(prepend));
}

/// Reorder `scripts` so the names in `order` come first, in that order,
/// followed by the remaining scripts in their original order
pub fn sort_scripts<S: AsRef<str>>(scripts: &Map<String, Value>, order: &[S]) -> Map<String, Value> {
    let mut sorted = Map::new();
    let mut placed = HashSet::new();

    for name in order {
        let name = name.as_ref();
        if let Some(command) = scripts.get(name) {
            if placed.insert(name) {
                sorted.insert(name.to_string(), command.clone());
            }
        }
    }

    for (name, command) in scripts {
        if !placed.contains(name.as_str()) {
            sorted.insert(name.clone(), command.clone());
        }
    }

    sorted
}

/// Apply [`sort_scripts`] to a manifest. Returns `false` when the manifest
/// has no scripts object.
pub fn sort_manifest_scripts<S: AsRef<str>>(manifest: &mut Map<String, Value>, order: &[S]) -> bool {
    match manifest.get_mut(SCRIPTS_KEY) {
        Some(Value::Object(scripts)) => {
            *scripts = sort_scripts(scripts, order);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_add_scripts_appends_by_default() {
        let mut manifest = object(json!({"scripts": {"build": "lint"}}));
        add_scripts(&mut manifest, &object(json!({"build": "tsc"})), false);
        assert_eq!(manifest["scripts"]["build"], "lint && tsc");
    }

    #[test]
    fn test_add_scripts_prepend() {
        let mut manifest = object(json!({"scripts": {"build": "lint"}}));
        add_scripts(&mut manifest, &object(json!({"build": "tsc"})), true);
        assert_eq!(manifest["scripts"]["build"], "tsc && lint");
    }

    #[test]
    fn test_add_scripts_adds_new_names() {
        let mut manifest = object(json!({"name": "lib", "scripts": {"build": "tsc"}}));
        add_scripts(&mut manifest, &object(json!({"test": "vitest run"})), false);
        assert_eq!(
            Value::Object(manifest),
            json!({"name": "lib", "scripts": {"build": "tsc", "test": "vitest run"}})
        );
    }

    #[test]
    fn test_add_scripts_creates_section() {
        let mut manifest = object(json!({"name": "lib"}));
        add_scripts(&mut manifest, &object(json!({"build": "tsc"})), true);
        assert_eq!(manifest["scripts"], json!({"build": "tsc"}));
    }

    #[test]
    fn test_sort_scripts() {
        let scripts = object(json!({"lint": "x", "build": "y", "test": "z"}));
        let sorted = sort_scripts(&scripts, &["test", "build"]);
        assert_eq!(keys(&sorted), ["test", "build", "lint"]);
        assert_eq!(sorted["lint"], "x");
        assert_eq!(sorted["build"], "y");
        assert_eq!(sorted["test"], "z");
    }

    #[test]
    fn test_sort_scripts_skips_unknown_and_repeated_names() {
        let scripts = object(json!({"a": "1", "b": "2", "c": "3", "d": "4"}));
        let sorted = sort_scripts(&scripts, &["c", "missing", "c", "a"]);
        assert_eq!(keys(&sorted), ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_sort_manifest_without_scripts() {
        let mut manifest = object(json!({"name": "lib"}));
        assert!(!sort_manifest_scripts(&mut manifest, &["build"]));
        assert_eq!(Value::Object(manifest), json!({"name": "lib"}));
    }
}
