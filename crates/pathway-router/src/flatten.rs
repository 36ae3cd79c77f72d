/// Route tree flattening
///
/// Walks the declared tree and produces one [`RouteBranch`] per root-to-leaf
/// path. Each route's own path is expanded into its optional-segment
/// variants, so a single declaration can yield several branches.
use tracing::trace;

use crate::route::compile::{CasedSegment, CompiledPattern};
use crate::route::parser::{explode_optional_segments, parse_pattern, ParsedPattern};
use crate::route::pattern::{render_segments, Segment};
use crate::{RouteConfigError, RouteDefinition, RouteId, RouteKind, RouterError, RouterOptions};

/// One route on a branch's ownership chain
#[derive(Debug, Clone)]
pub struct ChainEntry<'a> {
    pub route: &'a RouteDefinition,
    pub id: RouteId,
    /// Pattern segments consumed once this route has matched
    pub(crate) segment_count: usize,
}

/// One flattened root-to-leaf path through the route tree
#[derive(Debug, Clone)]
pub struct RouteBranch<'a> {
    pattern: CompiledPattern,
    chain: Vec<ChainEntry<'a>>,
    is_index: bool,
    order: usize,
}

impl<'a> RouteBranch<'a> {
    /// Compiled pattern of the full joined path
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Routes from the root ancestor down to the leaf
    pub fn chain(&self) -> &[ChainEntry<'a>] {
        &self.chain
    }

    pub fn leaf(&self) -> &ChainEntry<'a> {
        // A branch is only built after its leaf was pushed.
        &self.chain[self.chain.len() - 1]
    }

    /// Whether the leaf is an index route
    pub fn is_index(&self) -> bool {
        self.is_index
    }

    /// Position in declaration (emission) order
    pub fn order(&self) -> usize {
        self.order
    }
}

/// Accumulated state handed from a route to its children
#[derive(Debug, Clone, Default)]
struct Accumulator<'a> {
    /// Joined segments of this variant; optional segments here are present
    segments: Vec<CasedSegment>,
    /// Joined segments as declared, before optional expansion
    declared: Vec<CasedSegment>,
    chain: Vec<ChainEntry<'a>>,
}

impl<'a> Accumulator<'a> {
    /// New accumulator with `route` appended
    ///
    /// `declared` is the route's own path as written, `variant` the
    /// optional-segment expansion chosen for this branch. Ancestors whose
    /// segments were climbed out of by `..` end where the kept prefix ends.
    fn descend(
        &self,
        route: &'a RouteDefinition,
        id: RouteId,
        declared: &[Segment],
        variant: Vec<Segment>,
        parent_hops: usize,
        case_sensitive: bool,
    ) -> Self {
        let with_case = |segment: Segment| CasedSegment {
            segment,
            case_sensitive,
        };

        let kept = self.segments.len().saturating_sub(parent_hops);
        let mut segments = self.segments.clone();
        segments.truncate(kept);
        segments.extend(variant.into_iter().map(with_case));

        let mut joined = self.declared.clone();
        joined.truncate(self.declared.len().saturating_sub(parent_hops));
        joined.extend(declared.iter().cloned().map(with_case));

        let mut chain = self.chain.clone();
        for entry in &mut chain {
            entry.segment_count = entry.segment_count.min(kept);
        }
        chain.push(ChainEntry {
            route,
            id,
            segment_count: segments.len(),
        });

        Self {
            segments,
            declared: joined,
            chain,
        }
    }

    fn into_branch(self, is_index: bool, order: usize) -> Result<RouteBranch<'a>, RouterError> {
        let boundaries: Vec<usize> = self.chain.iter().map(|e| e.segment_count).collect();
        let leaf_id = self
            .chain
            .last()
            .map(|entry| entry.id.clone())
            .unwrap_or_else(|| RouteId::root(0));

        let pattern = CompiledPattern::from_segments(self.segments, &boundaries, true)
            .map_err(|source| RouterError::Pattern {
                route: leaf_id,
                source,
            })?;

        Ok(RouteBranch {
            pattern,
            chain: self.chain,
            is_index,
            order,
        })
    }
}

/// Flattens a route tree into branches in declaration order
///
/// # Examples
///
/// ```
/// use pathway_router::{flatten_routes, RouteDefinition, RouterOptions};
///
/// let routes = vec![RouteDefinition::nested(
///     "/dash",
///     vec![RouteDefinition::index(), RouteDefinition::path(":tab?")],
/// )];
///
/// let branches = flatten_routes(&routes, &RouterOptions::default()).unwrap();
/// let paths: Vec<&str> = branches.iter().map(|b| b.pattern().path()).collect();
/// assert_eq!(paths, vec!["/dash", "/dash/:tab", "/dash"]);
/// assert!(branches[0].is_index());
/// ```
///
/// # Errors
///
/// - [`RouterError::Pattern`] for malformed paths, tagged with the route id
/// - [`RouteConfigError::EmptyLayout`] for a layout route without children
/// - [`RouteConfigError::AbsolutePathOutsideParent`] for an absolute child
///   path that does not start with its parent's joined path
pub fn flatten_routes<'a>(
    routes: &'a [RouteDefinition],
    options: &RouterOptions,
) -> Result<Vec<RouteBranch<'a>>, RouterError> {
    let mut branches = Vec::new();
    let root = Accumulator::default();
    for (idx, route) in routes.iter().enumerate() {
        flatten_route(route, RouteId::root(idx), &root, options, &mut branches)?;
    }
    Ok(branches)
}

fn flatten_route<'a>(
    route: &'a RouteDefinition,
    id: RouteId,
    parent: &Accumulator<'a>,
    options: &RouterOptions,
    branches: &mut Vec<RouteBranch<'a>>,
) -> Result<(), RouterError> {
    let case_sensitive = route.case_sensitive || options.case_sensitive;

    let variants = match &route.kind {
        RouteKind::Layout { children } if children.is_empty() => {
            return Err(RouteConfigError::EmptyLayout { route: id }.into());
        }
        RouteKind::Index | RouteKind::Layout { .. } => {
            vec![parent.descend(route, id.clone(), &[], Vec::new(), 0, case_sensitive)]
        }
        RouteKind::Path { path, .. } => {
            let parsed = parse_pattern(path).map_err(|source| RouterError::Pattern {
                route: id.clone(),
                source,
            })?;
            let own = own_segments(&parsed, parent, &id, path, case_sensitive)?;
            explode_optional_segments(&own)
                .into_iter()
                .map(|variant| {
                    parent.descend(
                        route,
                        id.clone(),
                        &own,
                        variant,
                        parsed.parent_hops,
                        case_sensitive,
                    )
                })
                .collect()
        }
    };

    for acc in variants {
        if route.is_leaf() {
            let branch = acc.into_branch(route.is_index(), branches.len())?;
            trace!(route = %id, pattern = branch.pattern().path(), "flattened branch");
            branches.push(branch);
        } else {
            for (idx, child) in route.children().iter().enumerate() {
                flatten_route(child, id.child(idx), &acc, options, branches)?;
            }
        }
    }

    Ok(())
}

/// Segments a path route contributes below its parent
///
/// Absolute paths nested under a parent must repeat the parent's path as
/// declared, optional markers included; only the remainder belongs to the
/// route itself.
fn own_segments(
    parsed: &ParsedPattern,
    parent: &Accumulator<'_>,
    id: &RouteId,
    path: &str,
    case_sensitive: bool,
) -> Result<Vec<Segment>, RouterError> {
    if !parsed.absolute || parent.declared.is_empty() {
        return Ok(parsed.segments.clone());
    }

    let nested = parsed.segments.len() >= parent.declared.len()
        && parent
            .declared
            .iter()
            .zip(&parsed.segments)
            .all(|(outer, segment)| same_segment(outer, segment, case_sensitive));

    if !nested {
        let declared: Vec<Segment> = parent.declared.iter().map(|s| s.segment.clone()).collect();
        return Err(RouteConfigError::AbsolutePathOutsideParent {
            route: id.clone(),
            path: path.to_string(),
            parent: render_segments(&declared),
        }
        .into());
    }

    Ok(parsed.segments[parent.declared.len()..].to_vec())
}

/// Whether a child segment repeats a parent segment
///
/// Static text compares ignoring ASCII case unless either route is case
/// sensitive.
fn same_segment(outer: &CasedSegment, segment: &Segment, case_sensitive: bool) -> bool {
    match (&outer.segment, segment) {
        (Segment::Static(a), Segment::Static(b)) if outer.case_sensitive || case_sensitive => a == b,
        (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
        (a, b) => a == b,
    }
}
