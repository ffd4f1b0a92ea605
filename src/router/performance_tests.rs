// Performance-focused tests for router scalability
//
// Dispatch cost should track path depth and the number of dynamic edges at
// each level, not the total number of declared routes.

use super::Router;
use crate::declaration::RouteDecl;
use http::Method;
use std::time::Instant;

fn resource_routes(count: usize) -> Vec<RouteDecl<String>> {
    (0..count)
        .map(|i| {
            RouteDecl::new(format!("api/v1/resource{i}/:id"), format!("handler_{i}"))
                .with_constraint("id", "[0-9]+")
        })
        .collect()
}

#[test]
fn test_router_performance_with_many_routes() {
    let router = Router::new(resource_routes(500)).unwrap();

    let start = Instant::now();
    for _ in 0..1000 {
        let result = router.dispatch_get("api/v1/resource250/123");
        assert!(result.is_ok());
    }
    let duration = start.elapsed();

    // 1000 lookups against 500 routes should be well under the bound even
    // on a slow CI box in debug mode.
    assert!(
        duration.as_millis() < 200,
        "Router performance degraded: {}ms for 1000 lookups with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_router_handles_many_parameter_names() {
    let router = Router::new(vec![
        RouteDecl::new("api/users/:id", "get_user"),
        RouteDecl::new("api/users/:id/posts", "get_posts"),
        RouteDecl::new("api/users/:id/posts/:post_id", "get_post"),
    ])
    .unwrap();

    for i in 0..100 {
        let path = format!("api/users/{i}/posts");
        let m = router.dispatch_get(&path).unwrap();
        assert_eq!(*m.handler, "get_posts");
        assert_eq!(m.get_param("id"), Some(i.to_string().as_str()));
    }
}

#[test]
fn test_router_scalability_across_sizes() {
    for size in [10usize, 100, 1000] {
        let router = Router::new(resource_routes(size)).unwrap();
        let path = format!("api/v1/resource{}/42", size / 2);

        let start = Instant::now();
        for _ in 0..100 {
            assert!(router.dispatch_get(&path).is_ok());
        }
        let duration = start.elapsed();

        assert!(
            duration.as_millis() < 100,
            "Dispatch with {} routes took {}ms for 100 lookups",
            size,
            duration.as_millis()
        );
    }
}

#[test]
fn test_deep_paths_stay_inline() {
    let pattern: Vec<String> = (0..8).map(|i| format!(":p{i}")).collect();
    let router = Router::new(vec![RouteDecl::new(pattern.join("/"), "deep")]).unwrap();

    let m = router.dispatch_str("a/b/c/d/e/f/g/h", Method::GET.as_str()).unwrap();
    assert_eq!(m.params.len(), 8);
    assert!(!m.params.spilled());
    assert_eq!(m.get_param("p7"), Some("h"));
}

#[test]
fn test_build_large_table() {
    let start = Instant::now();
    let router = Router::new(resource_routes(2000)).unwrap();
    let duration = start.elapsed();

    assert_eq!(router.route_count(), 2000);
    assert!(
        duration.as_secs() < 30,
        "Building 2000 routes took {}ms",
        duration.as_millis()
    );
}
