use trellis_router_rs::matcher::CompiledMatcher;
use trellis_router_rs::pattern::CompileOptions;
use trellis_router_rs::{HttpMethod, Router, RouterOptions};

#[test]
fn wildcard_pattern_matches_any_path_with_decoded_capture() {
    let matcher =
        CompiledMatcher::new("*", &CompileOptions::default()).expect("wildcard should compile");

    let found = matcher
        .find("/files/a%20b")
        .expect("wildcard match should run")
        .expect("wildcard always matches");

    // The consumed path stays raw; the capture is decoded.
    assert_eq!(found.path, "/files/a%20b");
    assert_eq!(found.params.len(), 1);
    assert_eq!(found.params.get("0"), Some("/files/a b"));
}

#[test]
fn wildcard_fast_path_agrees_with_compiled_automaton() {
    let options = CompileOptions::default();
    let wildcard = CompiledMatcher::new("*", &options).expect("wildcard should compile");
    let spelled_out = CompiledMatcher::new("(.*)", &options).expect("capture-all should compile");

    for path in ["/", "/a", "/deep/nested/path"] {
        let fast = wildcard
            .find(path)
            .expect("fast path should run")
            .expect("wildcard always matches");
        let general = spelled_out
            .find(path)
            .expect("automaton should run")
            .expect("capture-all matches any path");

        assert_eq!(fast.path, general.path);
        assert_eq!(fast.params.get("0"), general.params.get("0"));
    }
}

#[test]
fn root_pattern_with_open_end_matches_everything_without_params() {
    let options = CompileOptions::builder().end(false).build();
    let matcher = CompiledMatcher::new("/", &options).expect("root should compile");

    let found = matcher
        .find("/whatever/else")
        .expect("root match should run")
        .expect("open-ended root always matches");

    assert_eq!(found.path, "");
    assert!(found.params.is_empty());
}

#[test]
fn router_when_wildcard_route_registered_then_captures_whole_path() {
    let router = Router::new(None);
    let key = router
        .add(HttpMethod::Get, "*")
        .expect("wildcard route should register");

    let found = router
        .find(HttpMethod::Get, "/files/media/logo.png")
        .expect("wildcard route should match");

    assert_eq!(found.key, key);
    assert_eq!(found.params.get("0"), Some("/files/media/logo.png"));
}

#[test]
fn router_when_open_ended_root_registered_then_acts_as_catch_all() {
    let options = RouterOptions {
        prefix: None,
        compile: CompileOptions::builder().end(false).build(),
    };
    let router = Router::new(Some(options));
    let key = router.add_all("/").expect("root route should register");

    for method in [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete] {
        let found = router
            .find(method, "/any/path/at/all")
            .expect("catch-all should match");
        assert_eq!(found.key, key);
        assert!(found.params.is_empty());
    }
}
