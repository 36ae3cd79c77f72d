//! Integration tests for pathway-router
//!
//! Tests are organized by feature area and cover:
//! - Ranking (static vs dynamic, parameter vs splat, declaration order)
//! - Optional segments and index routes
//! - Basenames and pathname normalization
//! - Case sensitivity
//! - Parameter decoding
//! - Ambiguity reporting

use pathway_router::*;
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn leaf_path<'a>(matches: &[RouteMatch<'a>]) -> Option<&'a str> {
    matches.last().and_then(|m| m.route.own_path())
}

fn match_leaf<'a>(ranked: &RankedBranches<'a>, pathname: &str) -> Option<&'a str> {
    match_routes(ranked, pathname, None).and_then(|matches| leaf_path(&matches))
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_static_beats_dynamic() {
    let routes = vec![
        RouteDefinition::path("/users/:id"),
        RouteDefinition::path("/users/me"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert_eq!(match_leaf(&ranked, "/users/me"), Some("/users/me"));
    assert_eq!(match_leaf(&ranked, "/users/42"), Some("/users/:id"));
}

#[test]
fn test_param_beats_splat() {
    let routes = vec![
        RouteDefinition::path("/files/*"),
        RouteDefinition::path("/files/:name"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/files/readme", None).unwrap();
    assert_eq!(leaf_path(&matches), Some("/files/:name"));
    assert_eq!(matches[0].param("name"), Some("readme"));

    let matches = match_routes(&ranked, "/files/docs/intro.md", None).unwrap();
    assert_eq!(leaf_path(&matches), Some("/files/*"));
    assert_eq!(matches[0].param("*"), Some("docs/intro.md"));
}

#[test]
fn test_splat_matches_empty_rest() {
    let routes = vec![RouteDefinition::path("/files/*")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/files", None).unwrap();
    assert_eq!(matches[0].param("*"), Some(""));
    assert_eq!(matches[0].pathname_base, "/files");
}

#[test]
fn test_root_splat_catches_everything() {
    let routes = vec![
        RouteDefinition::path("*").with_name("not-found"),
        RouteDefinition::path("/"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert_eq!(match_leaf(&ranked, "/"), Some("/"));
    let matches = match_routes(&ranked, "/no/such/page", None).unwrap();
    assert_eq!(matches[0].route.name.as_deref(), Some("not-found"));
    assert_eq!(matches[0].param("*"), Some("no/such/page"));
    assert_eq!(matches[0].pathname_base, "/");
}

#[test]
fn test_ranking_is_deterministic() {
    let routes = vec![
        RouteDefinition::path("/b/:x"),
        RouteDefinition::path("/a/:y"),
        RouteDefinition::path("/:section/:page"),
        RouteDefinition::path("/a/b"),
        RouteDefinition::path("*"),
    ];

    let first = compile(&routes, &RouterOptions::default()).unwrap();
    let second = compile(&routes, &RouterOptions::default()).unwrap();

    let order = |ranked: &RankedBranches<'_>| -> Vec<String> {
        ranked
            .branches()
            .iter()
            .map(|b| b.pattern().path().to_string())
            .collect()
    };
    assert_eq!(order(&first), order(&second));
    assert_eq!(
        order(&first),
        vec!["/a/b", "/b/:x", "/a/:y", "/:section/:page", "/*"]
    );

    for pathname in ["/a/b", "/a/c", "/b/c", "/x/y", "/x/y/z"] {
        assert_eq!(
            match_routes(&first, pathname, None),
            match_routes(&second, pathname, None)
        );
    }
}

#[test]
fn test_no_match_returns_none() {
    let routes = vec![RouteDefinition::path("/about")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert!(match_routes(&ranked, "/contact", None).is_none());
    assert!(match_routes(&ranked, "/about/team", None).is_none());
}

#[test]
fn test_empty_route_tree_never_matches() {
    let routes: Vec<RouteDefinition> = Vec::new();
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert!(ranked.is_empty());
    assert!(match_routes(&ranked, "/", None).is_none());
}

// ============================================================================
// Optional segments
// ============================================================================

#[test]
fn test_optional_trailing_segment() {
    let routes = vec![RouteDefinition::path("/a/:b?")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/a", None).unwrap();
    assert_eq!(matches[0].param("b"), None);
    assert_eq!(matches[0].pathname, "/a");

    let matches = match_routes(&ranked, "/a/x", None).unwrap();
    assert_eq!(matches[0].param("b"), Some("x"));
    assert_eq!(matches[0].pathname, "/a/x");

    assert!(match_routes(&ranked, "/a/x/y", None).is_none());
}

#[test]
fn test_optional_leading_segment() {
    let routes = vec![RouteDefinition::path("/:lang?/about")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/fr/about", None).unwrap();
    assert_eq!(matches[0].param("lang"), Some("fr"));

    let matches = match_routes(&ranked, "/about", None).unwrap();
    assert_eq!(matches[0].param("lang"), None);
}

#[test]
fn test_required_param_beats_optional_sibling() {
    let declared = vec![
        RouteDefinition::path("/a/:b?"),
        RouteDefinition::path("/a/:c"),
    ];
    let reversed: Vec<RouteDefinition> = declared.iter().rev().cloned().collect();

    for routes in [&declared, &reversed] {
        let ranked = compile(routes, &RouterOptions::default()).unwrap();

        let matches = match_routes(&ranked, "/a/x", None).unwrap();
        assert_eq!(leaf_path(&matches), Some("/a/:c"));
        assert_eq!(matches[0].param("c"), Some("x"));

        let matches = match_routes(&ranked, "/a", None).unwrap();
        assert_eq!(leaf_path(&matches), Some("/a/:b?"));
    }
}

// ============================================================================
// Basename and normalization
// ============================================================================

#[test]
fn test_basename_is_stripped() {
    let routes = vec![
        RouteDefinition::path("/"),
        RouteDefinition::path("/users/:id"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/app/users/3", Some("/app")).unwrap();
    assert_eq!(matches[0].param("id"), Some("3"));
    assert_eq!(matches[0].pathname, "/users/3");

    assert_eq!(
        match_routes(&ranked, "/app", Some("/app")).and_then(|m| leaf_path(&m)),
        Some("/")
    );
    assert_eq!(
        match_routes(&ranked, "/APP/users/3", Some("/app/")).map(|m| m.len()),
        Some(1)
    );
}

#[test]
fn test_pathname_outside_basename() {
    let routes = vec![RouteDefinition::path("/users/:id")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert!(match_routes(&ranked, "/users/3", Some("/app")).is_none());
    assert!(match_routes(&ranked, "/application/users/3", Some("/app")).is_none());
}

#[test]
fn test_basename_from_options() {
    let routes = vec![RouteDefinition::path("/users/:id")];
    let options = RouterOptions::default().with_basename("/app");
    let ranked = compile(&routes, &options).unwrap();

    assert!(ranked.match_pathname("/app/users/3").is_some());
    assert!(ranked.match_pathname("/users/3").is_none());
}

#[test]
fn test_search_hash_and_slashes_ignored() {
    let routes = vec![RouteDefinition::path("/users/:id")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    for pathname in [
        "/users/3",
        "/users/3/",
        "//users//3",
        "/users/3?tab=posts",
        "/users/3#bio",
        "users/3",
    ] {
        let matches = match_routes(&ranked, pathname, None)
            .unwrap_or_else(|| panic!("{pathname} should match"));
        assert_eq!(matches[0].param("id"), Some("3"));
        assert_eq!(matches[0].pathname, "/users/3");
    }
}

// ============================================================================
// Case sensitivity
// ============================================================================

#[test]
fn test_case_insensitive_by_default() {
    let routes = vec![RouteDefinition::path("/About")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert!(match_routes(&ranked, "/about", None).is_some());
    assert!(match_routes(&ranked, "/ABOUT", None).is_some());
}

#[test]
fn test_case_sensitive_route() {
    let routes = vec![
        RouteDefinition::path("/About").with_case_sensitive(true),
        RouteDefinition::path("/contact"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert!(match_routes(&ranked, "/About", None).is_some());
    assert!(match_routes(&ranked, "/about", None).is_none());
    assert!(match_routes(&ranked, "/CONTACT", None).is_some());
}

#[test]
fn test_case_sensitive_router() {
    let routes = vec![RouteDefinition::path("/about")];
    let options = RouterOptions::default().with_case_sensitivity(true);
    let ranked = compile(&routes, &options).unwrap();

    assert!(match_routes(&ranked, "/about", None).is_some());
    assert!(match_routes(&ranked, "/About", None).is_none());
}

#[test]
fn test_params_keep_their_case() {
    let routes = vec![RouteDefinition::path("/users/:name")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/USERS/Ada", None).unwrap();
    assert_eq!(matches[0].param("name"), Some("Ada"));
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_params_are_decoded() {
    let routes = vec![
        RouteDefinition::path("/tags/:tag"),
        RouteDefinition::path("/docs/*"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/tags/a%20b", None).unwrap();
    assert_eq!(matches[0].param("tag"), Some("a b"));
    assert_eq!(matches[0].pathname, "/tags/a%20b");

    let matches = match_routes(&ranked, "/docs/caf%C3%A9/menu", None).unwrap();
    assert_eq!(matches[0].param("*"), Some("café/menu"));
}

#[test]
fn test_undecodable_param_kept_raw() {
    init_tracing();
    let routes = vec![RouteDefinition::path("/tags/:tag")];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    let matches = match_routes(&ranked, "/tags/%FF", None).unwrap();
    assert_eq!(matches[0].param("tag"), Some("%FF"));

    let matches = match_routes(&ranked, "/tags/%", None).unwrap();
    assert_eq!(matches[0].param("tag"), Some("%"));
}

// ============================================================================
// Errors and ambiguity
// ============================================================================

#[test]
fn test_compile_rejects_bad_patterns() {
    let cases = vec![
        vec![RouteDefinition::path("/files/*/meta")],
        vec![RouteDefinition::path("/users/:")],
        vec![RouteDefinition::path("/:id/:id")],
        vec![RouteDefinition::nested(
            "/teams/:id",
            vec![RouteDefinition::path("members/:id")],
        )],
    ];

    for routes in &cases {
        let err = compile(routes, &RouterOptions::default()).unwrap_err();
        assert!(
            matches!(err, RouterError::Pattern { .. }),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn test_duplicate_param_error_names_route() {
    let routes = vec![
        RouteDefinition::path("/ok"),
        RouteDefinition::nested("/teams/:id", vec![RouteDefinition::path("members/:id")]),
    ];
    match compile(&routes, &RouterOptions::default()).unwrap_err() {
        RouterError::Pattern { route, source } => {
            assert_eq!(route.to_string(), "1-0");
            assert_eq!(
                source,
                PatternError::DuplicateParam {
                    path: "/teams/:id/members/:id".to_string(),
                    name: "id".to_string(),
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ambiguous_routes_reported() {
    init_tracing();
    let routes = vec![
        RouteDefinition::path("/users/:id").with_name("first"),
        RouteDefinition::path("/Users/:uid").with_name("second"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    assert_eq!(ranked.ambiguities().len(), 1);
    assert_eq!(ranked.ambiguities()[0].shadowed.to_string(), "1");

    let matches = match_routes(&ranked, "/users/1", None).unwrap();
    assert_eq!(matches[0].route.name.as_deref(), Some("first"));
}

#[test]
fn test_concurrent_matching() {
    let routes = vec![
        RouteDefinition::path("/users/:id"),
        RouteDefinition::path("/files/*"),
    ];
    let ranked = compile(&routes, &RouterOptions::default()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let ranked = &ranked;
                scope.spawn(move || {
                    let pathname = format!("/users/{n}");
                    let matches = match_routes(ranked, &pathname, None).unwrap();
                    matches[0].param("id").map(str::to_string)
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(n.to_string()));
        }
    });
}

// ============================================================================
// Single patterns and generation
// ============================================================================

#[test]
fn test_match_path() {
    let params = match_path("/posts/:year/:slug", "/posts/2024/hello-world")
        .unwrap()
        .unwrap();
    assert_eq!(params.get("year").map(String::as_str), Some("2024"));
    assert_eq!(params.get("slug").map(String::as_str), Some("hello-world"));

    assert_eq!(match_path("/posts/:year", "/posts").unwrap(), None);
}

#[test]
fn test_generated_path_matches_pattern() {
    let mut params = std::collections::HashMap::new();
    params.insert("tag".to_string(), "rust lang".to_string());

    let path = generate_path("/tags/:tag", &params).unwrap();
    assert_eq!(path, "/tags/rust%20lang");
    assert_eq!(match_path("/tags/:tag", &path).unwrap(), Some(params));
}
