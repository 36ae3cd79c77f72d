/// Matching a pathname against ranked branches
///
/// Matching is pure and stateless: the same branches, pathname and basename
/// always produce equal results.
use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::flatten::RouteBranch;
use crate::path::{normalize_pathname, split_pathname, strip_basename};
use crate::{CompiledPattern, DecodeError, PatternError, RankedBranches, RouteDefinition, RouteId};

/// One entry of a match result, from the root ancestor down to the leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch<'a> {
    /// The declared route this entry corresponds to
    pub route: &'a RouteDefinition,
    pub route_id: RouteId,
    /// Decoded parameters bound by this route and its ancestors
    pub params: HashMap<String, String>,
    /// Portion of the pathname consumed up to and including this route
    pub pathname: String,
    /// Same as `pathname`, minus the text captured by a trailing splat
    pub pathname_base: String,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Percent-decodes a captured value
pub fn try_decode(raw: &str) -> Result<String, DecodeError> {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .map_err(|source| DecodeError {
            raw: raw.to_string(),
            source,
        })
}

/// Percent-decodes a captured value, falling back to the raw text
pub(crate) fn decode_param(raw: &str) -> String {
    try_decode(raw).unwrap_or_else(|err| {
        warn!(error = %err, "keeping raw parameter value");
        raw.to_string()
    })
}

/// Matches a pathname against ranked branches
///
/// Search and hash are ignored. When a basename is given it is stripped
/// first and pathnames outside it do not match. Returns `None` when no
/// branch accepts the pathname.
///
/// # Examples
///
/// ```
/// use pathway_router::{compile, match_routes, RouteDefinition, RouterOptions};
///
/// let routes = vec![
///     RouteDefinition::path("/users/:id"),
///     RouteDefinition::path("/users/me"),
/// ];
/// let ranked = compile(&routes, &RouterOptions::default()).unwrap();
///
/// let matches = match_routes(&ranked, "/users/me", None).unwrap();
/// assert_eq!(matches[0].route.own_path(), Some("/users/me"));
///
/// let matches = match_routes(&ranked, "/app/users/3", Some("/app")).unwrap();
/// assert_eq!(matches[0].param("id"), Some("3"));
///
/// assert!(match_routes(&ranked, "/other/users/3", Some("/app")).is_none());
/// ```
pub fn match_routes<'a>(
    ranked: &RankedBranches<'a>,
    pathname: &str,
    basename: Option<&str>,
) -> Option<Vec<RouteMatch<'a>>> {
    let normalized = normalize_pathname(split_pathname(pathname));
    let stripped = match basename {
        Some(basename) => strip_basename(&normalized, basename)?,
        None => &*normalized,
    };

    let matched = ranked
        .branches()
        .iter()
        .find_map(|branch| match_branch(branch, stripped));

    debug!(
        pathname = stripped,
        matched = matched.is_some(),
        "matched pathname against route branches"
    );
    matched
}

impl<'a> RankedBranches<'a> {
    /// Matches a pathname using the basename from the router options
    ///
    /// ```
    /// use pathway_router::{compile, RouteDefinition, RouterOptions};
    ///
    /// let routes = vec![RouteDefinition::path("/users/:id")];
    /// let options = RouterOptions::default().with_basename("/app");
    /// let ranked = compile(&routes, &options).unwrap();
    ///
    /// let matches = ranked.match_pathname("/app/users/3?tab=posts").unwrap();
    /// assert_eq!(matches[0].param("id"), Some("3"));
    /// assert!(ranked.match_pathname("/users/3").is_none());
    /// ```
    pub fn match_pathname(&self, pathname: &str) -> Option<Vec<RouteMatch<'a>>> {
        match_routes(self, pathname, self.options().basename.as_deref())
    }
}

/// Builds the match records for one branch, if it accepts the pathname
fn match_branch<'a>(branch: &RouteBranch<'a>, pathname: &str) -> Option<Vec<RouteMatch<'a>>> {
    let raw = branch.pattern().captures(pathname)?;

    let param_positions: Vec<usize> = branch
        .pattern()
        .segments()
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.param_name().is_some())
        .map(|(position, _)| position)
        .collect();

    let decoded: Vec<(usize, String, String)> = raw
        .params
        .iter()
        .zip(&param_positions)
        .filter_map(|((name, value), position)| {
            value.map(|v| (*position, name.to_string(), decode_param(v)))
        })
        .collect();

    let matches = branch
        .chain()
        .iter()
        .zip(&raw.boundaries)
        .map(|(entry, &offset)| {
            let params = decoded
                .iter()
                .filter(|(position, _, _)| *position < entry.segment_count)
                .map(|(_, name, value)| (name.clone(), value.clone()))
                .collect();

            let base_end = match raw.splat_start {
                Some(start) if offset >= start => start.saturating_sub(1),
                _ => offset,
            };

            RouteMatch {
                route: entry.route,
                route_id: entry.id.clone(),
                params,
                pathname: prefix_or_root(pathname, offset),
                pathname_base: prefix_or_root(pathname, base_end),
            }
        })
        .collect();

    Some(matches)
}

fn prefix_or_root(pathname: &str, end: usize) -> String {
    match &pathname[..end] {
        "" => "/".to_string(),
        prefix => prefix.to_string(),
    }
}

/// Matches a single pattern against a pathname
///
/// Compiles `pattern` case-insensitively and returns the decoded parameters.
///
/// ```
/// use pathway_router::match_path;
///
/// let params = match_path("/tags/:tag", "/tags/a%20b").unwrap().unwrap();
/// assert_eq!(params.get("tag"), Some(&"a b".to_string()));
///
/// assert_eq!(match_path("/tags/:tag", "/posts/1").unwrap(), None);
/// assert!(match_path("/tags/*/x", "/tags").is_err());
/// ```
pub fn match_path(
    pattern: &str,
    pathname: &str,
) -> Result<Option<HashMap<String, String>>, PatternError> {
    Ok(CompiledPattern::compile(pattern, false)?.matches(pathname))
}
