#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A route file inside its own temporary directory.
    ///
    /// The directory (and file) is removed when this is dropped.
    pub struct TempRouteFile {
        _dir: TempDir,
        pub path: PathBuf,
    }

    impl TempRouteFile {
        pub fn write(&self, content: &str) {
            std::fs::write(&self.path, content).unwrap();
        }
    }

    /// Creates a route file named `routes.<ext>` in a fresh temporary directory
    pub fn create_temp_routes(content: &str, ext: &str) -> TempRouteFile {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("routes.{ext}"));
        std::fs::write(&path, content).unwrap();
        TempRouteFile { _dir: dir, path }
    }

    /// Creates a temporary route file with yaml extension
    pub fn create_temp_yaml(content: &str) -> TempRouteFile {
        create_temp_routes(content, "yaml")
    }

    /// Creates a temporary route file with json extension
    pub fn create_temp_json(content: &str) -> TempRouteFile {
        create_temp_routes(content, "json")
    }
}

pub mod fixtures {
    use segroute::RouteDecl;

    /// The reference route table used across the integration tests.
    pub fn reference_routes() -> Vec<RouteDecl<&'static str>> {
        vec![
            RouteDecl::new("users/long/:id", "handler1")
                .with_method("POST")
                .with_constraint("id", r"\d+"),
            RouteDecl::new("users/long/:way", "handler2").with_constraint("way", "[a-z]"),
            RouteDecl::new("users/long/way/:name", "handler3").with_constraint("name", "[a-z]+"),
            RouteDecl::new("api/:id/:name/risc-v", "handler4")
                .with_constraint("id", ".")
                .with_constraint("name", "^[a-z]+$"),
            RouteDecl::new("api/:id/:uid", "handler5").with_method("PUT"),
            RouteDecl::new("api/to/Japan/", "handler6"),
            RouteDecl::new("/", "root"),
        ]
    }

    pub const REFERENCE_YAML: &str = r#"routes:
  - path: users/long/:id
    method: POST
    handler: handler1
    constraints:
      id: '\d+'
  - path: users/long/:way
    handler: handler2
    constraints:
      way: '[a-z]'
  - path: users/long/way/:name
    handler: handler3
    constraints:
      name: '[a-z]+'
  - path: api/:id/:name/risc-v
    handler: handler4
    constraints:
      id: '.'
      name: '^[a-z]+$'
  - path: api/:id/:uid
    method: PUT
    handler: handler5
  - path: api/to/Japan/
    handler: handler6
  - path: /
    handler: root
"#;
}
