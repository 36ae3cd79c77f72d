/// Path pattern parsing
///
/// Pure functional parsers that turn route path strings into typed segments.
/// All functions are **pure**: same input → same output, no side effects.
use super::pattern::{classify_segment, Segment};
use crate::PatternError;

/// A route path split into typed segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    /// Segments left after resolving `.` and `..`
    pub segments: Vec<Segment>,
    /// Path started with `/`
    pub absolute: bool,
    /// Path ended with a literal `/` (ignored when matching)
    pub trailing_slash: bool,
    /// Leading `..` segments that climb above this path's own segments
    pub parent_hops: usize,
}

/// Internal state accumulator for fold-based parsing
///
/// All mutations are local to the fold accumulator.
#[derive(Default)]
struct ParseState {
    segments: Vec<Segment>,
    parent_hops: usize,
    absolute: bool,
}

impl ParseState {
    fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// `..` pops this path's own segment first, then climbs into the parent
    fn with_parent_hop(mut self) -> Self {
        if self.segments.pop().is_none() && !self.absolute {
            self.parent_hops += 1;
        }
        self
    }
}

fn process_segment(state: ParseState, segment: &str) -> ParseState {
    match segment {
        // Empty tokens come from leading, trailing or duplicate slashes
        "" | "." => state,
        ".." => state.with_parent_hop(),
        // Delegate to the pure classifier
        other => state.with_segment(classify_segment(other)),
    }
}

/// Parses a route path into segments (pure function)
///
/// # Examples
///
/// ```
/// use pathway_router::route::parser::parse_pattern;
/// use pathway_router::route::pattern::Segment;
///
/// let parsed = parse_pattern("/users/:id").unwrap();
/// assert!(parsed.absolute);
/// assert_eq!(parsed.segments.len(), 2);
/// assert_eq!(parsed.segments[0], Segment::Static("users".to_string()));
///
/// let parsed = parse_pattern("../docs/*").unwrap();
/// assert_eq!(parsed.parent_hops, 1);
/// assert_eq!(parsed.segments.last(), Some(&Segment::Splat));
///
/// assert!(parse_pattern("/files/*/meta").is_err());
/// assert!(parse_pattern("/users/:").is_err());
/// ```
///
/// # Errors
///
/// - [`PatternError::SplatNotLast`] when `*` is followed by another segment
/// - [`PatternError::EmptyParamName`] for `:` or `:?`
pub fn parse_pattern(path: &str) -> Result<ParsedPattern, PatternError> {
    let absolute = path.starts_with('/');

    // Functional pipeline: split → fold (accumulate segments and hops)
    let state = path.split('/').fold(
        ParseState {
            absolute,
            ..ParseState::default()
        },
        process_segment,
    );

    // Splat position and parameter names need the whole segment list
    validate_segments(path, &state.segments)?;

    Ok(ParsedPattern {
        segments: state.segments,
        absolute,
        trailing_slash: path.len() > 1 && path.ends_with('/'),
        parent_hops: state.parent_hops,
    })
}

/// Checks segment-level invariants of a full pattern
pub(crate) fn validate_segments(path: &str, segments: &[Segment]) -> Result<(), PatternError> {
    let last = segments.len().saturating_sub(1);
    // Short-circuit on the first invalid segment
    for (idx, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Splat if idx != last => {
                return Err(PatternError::SplatNotLast {
                    path: path.to_string(),
                })
            }
            Segment::Dynamic { name, .. } if name.is_empty() => {
                return Err(PatternError::EmptyParamName {
                    path: path.to_string(),
                })
            }
            _ => {}
        }
    }
    Ok(())
}

/// Expands optional segments into every present/absent combination
///
/// Present optional segments keep their marker, so they still score as
/// optional; absent ones are dropped. Variants with the segment present come
/// first.
///
/// # Examples
///
/// ```
/// use pathway_router::route::parser::{explode_optional_segments, parse_pattern};
/// use pathway_router::route::pattern::render_segments;
///
/// let parsed = parse_pattern("/:lang?/about/:tab?").unwrap();
/// let variants: Vec<String> = explode_optional_segments(&parsed.segments)
///     .iter()
///     .map(|segments| render_segments(segments))
///     .collect();
///
/// assert_eq!(
///     variants,
///     vec!["/:lang?/about/:tab?", "/:lang?/about", "/about/:tab?", "/about"]
/// );
/// ```
pub fn explode_optional_segments(segments: &[Segment]) -> Vec<Vec<Segment>> {
    let Some((first, rest)) = segments.split_first() else {
        return vec![Vec::new()];
    };

    // Expand the tail first, then prefix each tail variant with this segment
    let rest_variants = explode_optional_segments(rest);
    let with_first = rest_variants.iter().map(|variant| {
        let mut segments = Vec::with_capacity(variant.len() + 1);
        segments.push(first.clone());
        segments.extend(variant.iter().cloned());
        segments
    });

    let mut variants: Vec<Vec<Segment>> = with_first.collect();
    // Optional: also emit the tails without this segment
    if first.is_optional() {
        variants.extend(rest_variants);
    }
    variants
}
