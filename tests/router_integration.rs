use std::sync::Arc;
use std::thread;

use trellis_router_rs::matcher::CompiledMatcher;
use trellis_router_rs::pattern::{CompileOptions, RoutePath};
use trellis_router_rs::{HttpMethod, Router, RouterError, RouterOptions};

#[test]
fn router_when_methods_share_path_then_each_gets_its_own_route() {
    let router = Router::new(None);
    let get_key = router
        .add(HttpMethod::Get, "/articles")
        .expect("GET route should register");
    let post_key = router
        .add(HttpMethod::Post, "/articles")
        .expect("POST route should register");

    assert_ne!(get_key, post_key);
    assert_eq!(
        router
            .find(HttpMethod::Get, "/articles")
            .expect("GET lookup should succeed")
            .key,
        get_key
    );
    assert_eq!(
        router
            .find(HttpMethod::Post, "/articles")
            .expect("POST lookup should succeed")
            .key,
        post_key
    );
}

#[test]
fn router_when_routes_overlap_then_first_registered_wins() {
    let router = Router::new(None);
    let param_key = router
        .add(HttpMethod::Get, "/users/:id")
        .expect("parameter route should register");
    router
        .add(HttpMethod::Get, "/users/admin")
        .expect("static route should register");

    let found = router
        .find(HttpMethod::Get, "/users/admin")
        .expect("lookup should succeed");
    assert_eq!(found.key, param_key);
    assert_eq!(found.params.get("id"), Some("admin"));
}

#[test]
fn router_when_any_method_route_registered_then_all_methods_match() {
    let router = Router::new(None);
    let key = router
        .add_all("/health")
        .expect("any-method route should register");

    for method in [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Head,
    ] {
        let found = router
            .find(method, "/health")
            .expect("any-method route should match");
        assert_eq!(found.key, key);
    }
}

#[test]
fn router_when_method_layer_exists_then_it_beats_any_method_layer() {
    let router = Router::new(None);
    let any_key = router
        .add_all("/ping")
        .expect("any-method route should register");
    let get_key = router
        .add(HttpMethod::Get, "/ping")
        .expect("GET route should register");

    assert_eq!(
        router
            .find(HttpMethod::Get, "/ping")
            .expect("GET lookup should succeed")
            .key,
        get_key
    );
    assert_eq!(
        router
            .find(HttpMethod::Post, "/ping")
            .expect("POST lookup should fall through")
            .key,
        any_key
    );
}

#[test]
fn router_when_prefix_configured_then_it_is_stripped_before_matching() {
    let options = RouterOptions::builder()
        .prefix("/api")
        .build()
        .expect("options should build");
    let router = Router::new(Some(options));
    let users_key = router
        .add(HttpMethod::Get, "/users/:id")
        .expect("route should register");
    let root_key = router
        .add(HttpMethod::Get, "/")
        .expect("root route should register");

    let found = router
        .find(HttpMethod::Get, "/api/users/42")
        .expect("prefixed lookup should succeed");
    assert_eq!(found.key, users_key);
    assert_eq!(found.params.get("id"), Some("42"));

    // A path equal to the prefix matches the root route.
    assert_eq!(
        router
            .find(HttpMethod::Get, "/api")
            .expect("bare prefix should match root")
            .key,
        root_key
    );

    let err = router.find(HttpMethod::Get, "/outside/users/42");
    match err.expect_err("paths outside the prefix should miss") {
        RouterError::RouteNotFound { path, .. } => assert_eq!(path, "/outside/users/42"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_no_route_matches_then_error_names_method_and_path() {
    let router = Router::new(None);
    router
        .add(HttpMethod::Get, "/known")
        .expect("route should register");

    let err = router.find(HttpMethod::Delete, "/unknown");
    match err.expect_err("expected lookup miss") {
        RouterError::RouteNotFound { method, path } => {
            assert_eq!(method, HttpMethod::Delete);
            assert_eq!(path, "/unknown");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn concurrent_matches_never_observe_each_others_parameters() {
    let matcher = Arc::new(
        CompiledMatcher::new(RoutePath::from("/users/:id"), &CompileOptions::default())
            .expect("pattern should compile"),
    );

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                for round in 0..200 {
                    let id = format!("{worker}-{round}");
                    let found = matcher
                        .find(&format!("/users/{id}"))
                        .expect("match should run")
                        .expect("path should match");
                    assert_eq!(found.params.get("id"), Some(id.as_str()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread should not panic");
    }
}

#[test]
fn concurrent_router_lookups_return_independent_results() {
    let router = Arc::new(Router::new(None));
    router
        .add(HttpMethod::Get, "/items/:sku")
        .expect("route should register");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for round in 0..100 {
                    let sku = format!("sku-{worker}-{round}");
                    let found = router
                        .find(HttpMethod::Get, &format!("/items/{sku}"))
                        .expect("lookup should succeed");
                    assert_eq!(found.params.get("sku"), Some(sku.as_str()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread should not panic");
    }
}
