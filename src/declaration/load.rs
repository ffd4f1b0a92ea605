use super::types::RouteDecl;
use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;

/// Declarations as read from a route file: handler payloads stay raw JSON.
pub type ValueRoute = RouteDecl<Value>;

/// Load route declarations from a YAML (`.yaml`/`.yml`) or JSON file.
///
/// The file holds either a sequence of declarations or a mapping with a
/// `routes` sequence. Order is preserved; it decides match precedence.
pub fn load_routes(file_path: impl AsRef<Path>) -> anyhow::Result<Vec<ValueRoute>> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read route file {}", file_path.display()))?;

    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let routes = if is_yaml {
        parse_routes_yaml(&content)
    } else {
        parse_routes_json(&content)
    };
    routes.with_context(|| format!("invalid route file {}", file_path.display()))
}

pub fn parse_routes_yaml(content: &str) -> anyhow::Result<Vec<ValueRoute>> {
    let value: Value = serde_yaml::from_str(content)?;
    routes_from_value(value)
}

pub fn parse_routes_json(content: &str) -> anyhow::Result<Vec<ValueRoute>> {
    let value: Value = serde_json::from_str(content)?;
    routes_from_value(value)
}

fn routes_from_value(value: Value) -> anyhow::Result<Vec<ValueRoute>> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut table) => match table.remove("routes") {
            Some(Value::Array(list)) => list,
            Some(other) => bail!("`routes` must be a sequence, found {}", kind_of(&other)),
            None => bail!("expected a sequence of routes or a mapping with a `routes` key"),
        },
        Value::Null => Vec::new(),
        other => bail!("expected a sequence of routes, found {}", kind_of(&other)),
    };

    list.into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            serde_json::from_value::<ValueRoute>(entry).with_context(|| format!("route #{}", idx))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_sequence() {
        let routes = parse_routes_yaml(
            r#"
- path: users/long/:id
  method: POST
  handler: { body: handler1 }
  constraints: { id: '\d+' }
- path: /
  handler: root
"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method_or_default(), "POST");
        assert_eq!(routes[0].constraints["id"], r"\d+");
        assert_eq!(routes[1].path, "/");
        assert_eq!(routes[1].handler, json!("root"));
    }

    #[test]
    fn test_routes_key_and_extra_fields() {
        let routes = parse_routes_json(
            r#"{ "routes": [ { "path": "a/b", "handler": 1, "tag": "x" } ] }"#,
        )
        .unwrap();
        assert_eq!(routes[0].extra.get("tag"), Some(&json!("x")));
    }

    #[test]
    fn test_missing_handler_names_route() {
        let err = parse_routes_json(r#"[ { "path": "a" }, { "path": "b" } ]"#).unwrap_err();
        assert_eq!(err.to_string(), "route #0");
        assert!(format!("{:#}", err).contains("handler"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        assert!(parse_routes_yaml("42").is_err());
        assert!(parse_routes_json(r#"{ "routes": "nope" }"#).is_err());
    }
}
