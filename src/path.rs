//! Dotted-path navigation over dynamically shaped configuration trees.
//!
//! Paths are separator-split key sequences ("server.port") navigating nested
//! mappings. Reads tolerate absence; writes create missing levels; deletes
//! through a missing level are a no-op.

use serde_json::{Map, Value};

/// Split a path into segments using the given separator.
pub fn split<'a>(path: &'a str, separator: &str) -> Vec<&'a str> {
    path.split(separator).collect()
}

/// Walk `root` segment by segment, returning the value at the path.
///
/// Returns `None` if any intermediate segment is missing or is not a
/// mapping. Absence is a normal outcome, never an error.
pub fn get_path<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

/// Write `value` at the path, creating intermediate mappings as needed.
///
/// A non-mapping intermediate is replaced by an empty mapping before
/// descending, so the write always lands. An empty segment list is a no-op.
pub fn set_path(root: &mut Value, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut target = root;
    for segment in parents {
        if !target.is_object() {
            *target = Value::Object(Map::new());
        }
        let Value::Object(map) = target else {
            return;
        };
        target = map
            .entry(*segment)
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        map.insert((*last).to_string(), value);
    }
}

/// Remove the key named by the final segment from its parent mapping.
///
/// Returns whether a value was actually removed. A missing or non-mapping
/// intermediate makes this a silent no-op, consistent with [`get_path`].
pub fn delete_path(root: &mut Value, segments: &[&str]) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut target = root;
    for segment in parents {
        match target {
            Value::Object(map) => match map.get_mut(*segment) {
                Some(next) => target = next,
                None => return false,
            },
            _ => return false,
        }
    }

    match target {
        Value::Object(map) => map.remove(*last).is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_value() {
        let tree = json!({"a": {"b": {"c": 5}}});
        assert_eq!(get_path(&tree, &["a", "b", "c"]), Some(&json!(5)));
        assert_eq!(get_path(&tree, &["a", "b"]), Some(&json!({"c": 5})));
    }

    #[test]
    fn test_get_missing_path_returns_none() {
        let tree = json!({"a": {"b": 1}});
        assert_eq!(get_path(&tree, &["a", "x", "c"]), None);
        assert_eq!(get_path(&tree, &["z"]), None);
    }

    #[test]
    fn test_get_through_scalar_returns_none() {
        let tree = json!({"a": 1});
        assert_eq!(get_path(&tree, &["a", "b"]), None);
    }

    #[test]
    fn test_set_creates_intermediate_levels() {
        let mut tree = json!({});
        set_path(&mut tree, &["a", "b", "c"], json!(7));
        assert_eq!(tree, json!({"a": {"b": {"c": 7}}}));
    }

    #[test]
    fn test_set_overwrites_subtree() {
        let mut tree = json!({"a": {"b": {"c": 1}}});
        set_path(&mut tree, &["a", "b"], json!("flat"));
        assert_eq!(tree, json!({"a": {"b": "flat"}}));
    }

    #[test]
    fn test_set_through_scalar_replaces_it() {
        let mut tree = json!({"a": 1});
        set_path(&mut tree, &["a", "b"], json!(2));
        assert_eq!(tree, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_set_empty_segments_is_noop() {
        let mut tree = json!({"a": 1});
        set_path(&mut tree, &[], json!(9));
        assert_eq!(tree, json!({"a": 1}));
    }

    #[test]
    fn test_delete_removes_key() {
        let mut tree = json!({"a": {"b": 1, "c": 2}});
        assert!(delete_path(&mut tree, &["a", "b"]));
        assert_eq!(tree, json!({"a": {"c": 2}}));
    }

    #[test]
    fn test_delete_missing_intermediate_is_noop() {
        let mut tree = json!({"a": {"b": 1}});
        assert!(!delete_path(&mut tree, &["x", "y"]));
        assert!(!delete_path(&mut tree, &["a", "b", "c"]));
        assert_eq!(tree, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_split_with_custom_separator() {
        assert_eq!(split("a/b/c", "/"), vec!["a", "b", "c"]);
        assert_eq!(split("a.b", "."), vec!["a", "b"]);
    }
}
