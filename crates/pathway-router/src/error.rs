/// Error types for route compilation and matching
///
/// Structural problems (bad patterns, invalid route declarations) surface from
/// [`crate::compile`]. Decoding problems never escape matching: they are
/// logged and the raw captured text is used instead.
use std::string::FromUtf8Error;

use crate::RouteId;

/// A malformed path pattern
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("splat `*` must be the last segment of `{path}`")]
    SplatNotLast { path: String },
    #[error("empty parameter name in `{path}`")]
    EmptyParamName { path: String },
    #[error("parameter `{name}` appears more than once in `{path}`")]
    DuplicateParam { path: String, name: String },
    #[error("missing value for required parameter `{name}` of `{path}`")]
    MissingParam { path: String, name: String },
    #[error("failed to build matcher: {0}")]
    Regex(#[from] regex::Error),
}

/// A structurally invalid route declaration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteConfigError {
    #[error("index route {route} cannot have children")]
    IndexWithChildren { route: RouteId },
    #[error("index route {route} cannot have a path (found `{path}`)")]
    IndexWithPath { route: RouteId, path: String },
    #[error("route {route} has no path, is not an index route and has no children")]
    EmptyLayout { route: RouteId },
    #[error("absolute path `{path}` of route {route} is not nested under parent path `{parent}`")]
    AbsolutePathOutsideParent {
        route: RouteId,
        path: String,
        parent: String,
    },
}

/// Any failure while turning a route tree into ranked branches
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid pattern on route {route}: {source}")]
    Pattern {
        route: RouteId,
        #[source]
        source: PatternError,
    },
    #[error(transparent)]
    Config(#[from] RouteConfigError),
    #[error("invalid route manifest: {0}")]
    Manifest(#[from] toml::de::Error),
}

/// Percent-decoding failure for a captured parameter
///
/// Only produced internally and logged; matching falls back to the raw value.
#[derive(Debug, thiserror::Error)]
#[error("could not percent-decode `{raw}`: {source}")]
pub struct DecodeError {
    pub raw: String,
    #[source]
    pub source: FromUtf8Error,
}
