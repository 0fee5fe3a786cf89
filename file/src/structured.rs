//! TOML, YAML and JSON readers.
//!
//! Each format is parsed with its serde crate into a generic value and then
//! converted into a [`ConfigTree`]: tables become branches, scalars become
//! their textual form, and arrays of scalars are joined with
//! [`DEFAULT_DELIMITER`] so they read back through the vector parser.

use optgroup_core::{ConfigTree, DEFAULT_DELIMITER};

pub(crate) fn parse_toml(content: &str) -> Result<ConfigTree, String> {
    let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
    toml_table(&table)
}

pub(crate) fn parse_yaml(content: &str) -> Result<ConfigTree, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    match value {
        serde_yaml::Value::Mapping(_) => yaml_node(&value),
        // An empty document has no groups at all.
        serde_yaml::Value::Null => Ok(ConfigTree::new()),
        _ => Err("top level must be a mapping of groups".to_string()),
    }
}

pub(crate) fn parse_json(content: &str) -> Result<ConfigTree, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    match value {
        serde_json::Value::Object(_) => json_node(&value),
        _ => Err("top level must be an object of groups".to_string()),
    }
}

fn join_scalars(items: Vec<String>) -> String {
    items.join(&DEFAULT_DELIMITER.to_string())
}

fn toml_table(table: &toml::Table) -> Result<ConfigTree, String> {
    let mut tree = ConfigTree::new();
    for (key, value) in table {
        tree.insert(key.as_str(), toml_node(value)?);
    }
    Ok(tree)
}

fn toml_node(value: &toml::Value) -> Result<ConfigTree, String> {
    match value {
        toml::Value::Table(table) => toml_table(table),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(|items| ConfigTree::leaf(join_scalars(items))),
        scalar => toml_scalar(scalar).map(ConfigTree::leaf),
    }
}

fn toml_scalar(value: &toml::Value) -> Result<String, String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(dt) => Ok(dt.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            Err("nested arrays and tables inside arrays are not supported".to_string())
        }
    }
}

fn yaml_node(value: &serde_yaml::Value) -> Result<ConfigTree, String> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let mut tree = ConfigTree::new();
            for (key, child) in map {
                let key = yaml_scalar(key).map_err(|_| "mapping keys must be scalars".to_string())?;
                tree.insert(key, yaml_node(child)?);
            }
            Ok(tree)
        }
        Value::Sequence(items) => items
            .iter()
            .map(yaml_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(|items| ConfigTree::leaf(join_scalars(items))),
        Value::Tagged(tagged) => yaml_node(&tagged.value),
        scalar => yaml_scalar(scalar).map(ConfigTree::leaf),
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err("nested sequences and mappings inside sequences are not supported".to_string())
        }
    }
}

fn json_node(value: &serde_json::Value) -> Result<ConfigTree, String> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let mut tree = ConfigTree::new();
            for (key, child) in map {
                tree.insert(key.as_str(), json_node(child)?);
            }
            Ok(tree)
        }
        Value::Array(items) => items
            .iter()
            .map(json_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(|items| ConfigTree::leaf(join_scalars(items))),
        scalar => json_scalar(scalar).map(ConfigTree::leaf),
    }
}

fn json_scalar(value: &serde_json::Value) -> Result<String, String> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            Err("nested arrays and objects inside arrays are not supported".to_string())
        }
    }
}
