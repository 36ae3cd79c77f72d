//! # Pathway Router
//!
//! Route matching and ranking for nested, declaratively configured routes:
//! - Static segments (`/about`)
//! - Dynamic parameters (`/users/:id`)
//! - Optional segments (`/posts/:id?`, `/:lang?/about`)
//! - Splats (`/files/*`)
//! - Index and pathless layout routes
//!
//! ## Pipeline
//!
//! A route tree is compiled once and matched many times:
//! - **Flatten**: every root-to-leaf path becomes a [`RouteBranch`] with a
//!   compiled pattern and the chain of routes that own it
//! - **Rank**: branches are sorted by specificity so the first match wins
//! - **Match**: a pathname is normalized, stripped of its basename and tested
//!   against each branch in rank order
//!
//! Matching is pure: the same ranked branches, pathname and basename always
//! return equal results.
//!
//! ## Example
//!
//! ```
//! use pathway_router::{compile, match_routes, RouteDefinition, RouterOptions};
//!
//! let routes = vec![RouteDefinition::nested(
//!     "/users",
//!     vec![
//!         RouteDefinition::index().with_name("user-list"),
//!         RouteDefinition::path(":id").with_name("user"),
//!     ],
//! )];
//!
//! let ranked = compile(&routes, &RouterOptions::default()).unwrap();
//! let matches = match_routes(&ranked, "/users/42", None).unwrap();
//!
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].pathname, "/users");
//! assert_eq!(matches[1].param("id"), Some("42"));
//! assert_eq!(matches[1].route.name.as_deref(), Some("user"));
//! ```

use tracing::debug;

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod definition;
mod error;
pub mod flatten;
mod matcher;
pub mod path;
pub mod rank;
pub mod route;

pub use config::{RouteConfig, RouteManifest, RouterOptions};
pub use definition::{RouteDefinition, RouteId, RouteKind};
pub use error::{DecodeError, PatternError, RouteConfigError, RouterError};
pub use flatten::{flatten_routes, ChainEntry, RouteBranch};
pub use matcher::{match_path, match_routes, try_decode, RouteMatch};
pub use rank::{rank_branches, Ambiguity, RankedBranches};
pub use route::{generate_path, CompiledPattern};

/// Compiles a route tree into ranked branches
///
/// Flattens `routes` and sorts the resulting branches by specificity. The
/// returned value borrows `routes` and can be shared between threads for
/// concurrent matching.
///
/// # Errors
///
/// Fails on the first malformed pattern or invalid route declaration; no
/// partial result is returned.
///
/// # Examples
///
/// ```
/// use pathway_router::{compile, RouteDefinition, RouterError, RouterOptions};
///
/// let routes = vec![RouteDefinition::path("/files/*/meta")];
/// let err = compile(&routes, &RouterOptions::default()).unwrap_err();
/// assert!(matches!(err, RouterError::Pattern { .. }));
/// ```
pub fn compile<'a>(
    routes: &'a [RouteDefinition],
    options: &RouterOptions,
) -> Result<RankedBranches<'a>, RouterError> {
    let branches = flatten_routes(routes, options)?;
    debug!(
        routes = routes.len(),
        branches = branches.len(),
        "flattened route tree"
    );
    Ok(RankedBranches::new(branches, options.clone()))
}
