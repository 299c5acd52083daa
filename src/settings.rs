//! Loosely-typed module settings and the lenient accessors used to read them.
//!
//! Every accessor falls back to a default instead of failing: a setting of the
//! wrong type behaves like a missing one.

use std::{fs, path::Path};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// A module configuration, as read from its YAML file.
pub type SettingsMap = Map<String, Value>;

// ── Loading ───────────────────────────────────────────────────────────────────

/// Reads and parses a YAML module configuration file.
pub fn load_file(path: &Path) -> Result<SettingsMap, ConfigError> {
    let content = fs::read_to_string(path)?;
    let map = parse(&content, &path.display().to_string())?;
    debug!(path = %path.display(), keys = map.len(), "loaded module configuration");
    Ok(map)
}

/// Parses a YAML document. An empty document is an empty map.
pub fn from_yaml_str(text: &str) -> Result<SettingsMap, ConfigError> {
    parse(text, "<string>")
}

fn parse(text: &str, origin: &str) -> Result<SettingsMap, ConfigError> {
    if text.trim().is_empty() {
        return Ok(SettingsMap::new());
    }
    match serde_yaml::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(SettingsMap::new()),
        _ => Err(ConfigError::NotAMapping(origin.to_string())),
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────────

pub fn get_bool(map: &SettingsMap, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Strings as-is; numbers and booleans are stringified.
pub fn get_string(map: &SettingsMap, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(scalar_to_string)
        .unwrap_or_else(|| default.to_string())
}

/// A list of scalars, or a single scalar as a one-element list.
pub fn get_string_list(map: &SettingsMap, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(v) => scalar_to_string(v).into_iter().collect(),
        None => vec![],
    }
}

pub fn get_double(map: &SettingsMap, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> SettingsMap {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn bool_ignores_wrong_types() {
        let m = map(json!({ "a": false, "b": "yes", "c": 1 }));
        assert!(!get_bool(&m, "a", true));
        assert!(get_bool(&m, "b", true));
        assert!(!get_bool(&m, "c", false));
        assert!(get_bool(&m, "missing", true));
    }

    #[test]
    fn string_stringifies_scalars() {
        let m = map(json!({ "s": "gpt", "n": 300, "list": ["x"] }));
        assert_eq!(get_string(&m, "s", ""), "gpt");
        assert_eq!(get_string(&m, "n", ""), "300");
        assert_eq!(get_string(&m, "list", "dflt"), "dflt");
        assert_eq!(get_string(&m, "missing", "/boot/efi"), "/boot/efi");
    }

    #[test]
    fn string_list_accepts_single_scalar() {
        let m = map(json!({ "one": "gpt", "many": ["msdos", "gpt"], "obj": {"k": 1} }));
        assert_eq!(get_string_list(&m, "one"), vec!["gpt"]);
        assert_eq!(get_string_list(&m, "many"), vec!["msdos", "gpt"]);
        assert!(get_string_list(&m, "obj").is_empty());
        assert!(get_string_list(&m, "missing").is_empty());
    }

    #[test]
    fn double_accepts_integers() {
        let m = map(json!({ "i": 8, "f": 5.5, "s": "12" }));
        assert_eq!(get_double(&m, "i", -1.0), 8.0);
        assert_eq!(get_double(&m, "f", -1.0), 5.5);
        assert_eq!(get_double(&m, "s", -1.0), -1.0);
    }

    #[test]
    fn yaml_documents_must_be_mappings() {
        let m = from_yaml_str("efiSystemPartition: /boot\nneverCreateSwap: true\n").unwrap();
        assert_eq!(get_string(&m, "efiSystemPartition", ""), "/boot");
        assert!(get_bool(&m, "neverCreateSwap", false));

        assert!(from_yaml_str("").unwrap().is_empty());
        assert!(matches!(
            from_yaml_str("- a\n- b\n"),
            Err(ConfigError::NotAMapping(_))
        ));
        assert!(matches!(from_yaml_str("a: [unclosed"), Err(ConfigError::Yaml(_))));
    }
}
