use segroute::{load_routes, parse_routes_json, Router};
use serde_json::json;

mod common;
use common::fixtures::REFERENCE_YAML;
use common::temp_files;

#[test]
fn test_load_yaml_reference_table() {
    let file = temp_files::create_temp_yaml(REFERENCE_YAML);
    let routes = load_routes(&file.path).unwrap();
    assert_eq!(routes.len(), 7);

    let router = Router::new(routes).unwrap();
    let m = router.dispatch_str("api/v1/Risc/", "PUT").unwrap();
    assert_eq!(*m.handler, json!("handler5"));
    assert_eq!(m.get_param("uid"), Some("Risc"));

    let m = router.dispatch_str("users/long/1", "POST").unwrap();
    assert_eq!(*m.handler, json!("handler1"));
}

#[test]
fn test_load_json_top_level_array() {
    let file = temp_files::create_temp_json(
        r#"[
            { "path": "reports/:year", "handler": { "fn": "report" }, "constraints": { "year": "[0-9]{4}" }, "owner": "finance" },
            { "path": "reports/latest", "handler": { "fn": "latest" } }
        ]"#,
    );
    let router = Router::new(load_routes(&file.path).unwrap()).unwrap();

    let m = router.dispatch_get("reports/2024").unwrap();
    assert_eq!(*m.handler, json!({ "fn": "report" }));
    assert_eq!(m.extra.get("owner"), Some(&json!("finance")));

    let m = router.dispatch_get("reports/latest").unwrap();
    assert_eq!(*m.handler, json!({ "fn": "latest" }));

    assert!(router.dispatch_get("reports/24").is_err());
}

#[test]
fn test_yml_extension_is_yaml() {
    let file = temp_files::create_temp_routes("- path: a\n  handler: 1\n", "yml");
    assert_eq!(load_routes(&file.path).unwrap().len(), 1);
}

#[test]
fn test_reload_after_edit() {
    let file = temp_files::create_temp_yaml("- path: a\n  handler: 1\n");
    assert_eq!(load_routes(&file.path).unwrap().len(), 1);

    file.write("- path: a\n  handler: 1\n- path: b\n  handler: 2\n");
    assert_eq!(load_routes(&file.path).unwrap().len(), 2);
}

#[test]
fn test_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = load_routes(&path).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_syntax_error_names_path() {
    let file = temp_files::create_temp_json("[ { \"path\": ");
    let err = load_routes(&file.path).unwrap_err();
    assert!(err.to_string().contains("routes.json"));
}

#[test]
fn test_missing_path_field() {
    let err = parse_routes_json(r#"[ { "handler": 1 } ]"#).unwrap_err();
    assert!(format!("{err:#}").contains("path"));
}

#[test]
fn test_method_field_is_kept_verbatim() {
    let routes = parse_routes_json(r#"[ { "path": "x", "method": "purge", "handler": 0 } ]"#).unwrap();
    assert_eq!(routes[0].method.as_deref(), Some("purge"));

    let router = Router::new(routes).unwrap();
    assert!(router.dispatch_str("x", "PURGE").is_err());
    assert!(router.dispatch_str("x", "purge").is_ok());
}
