/// Segment classification for route patterns
///
/// Pure functional parsing of single `/`-delimited tokens into typed segments.
/// All functions are **pure**: same input → same output, no side effects.
use std::fmt;

/// One `/`-delimited token of a route pattern
///
/// # Examples
///
/// ```
/// use pathway_router::route::pattern::{classify_segment, Segment};
///
/// assert!(matches!(classify_segment("about"), Segment::Static(_)));
/// assert!(matches!(classify_segment(":id"), Segment::Dynamic { optional: false, .. }));
/// assert!(matches!(classify_segment(":id?"), Segment::Dynamic { optional: true, .. }));
/// assert_eq!(classify_segment("*"), Segment::Splat);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text
    Static(String),
    /// Parameter `:name`, or `:name?` when optional
    Dynamic { name: String, optional: bool },
    /// Wildcard `*` consuming the rest of the path, bound as `*`
    Splat,
}

/// Parameter name under which a splat capture is stored
pub const SPLAT_PARAM: &str = "*";

impl Segment {
    /// Name this segment binds, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Dynamic { name, .. } => Some(name),
            Segment::Splat => Some(SPLAT_PARAM),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Segment::Dynamic { optional: true, .. })
    }

    /// Same segment with any optional marker removed
    pub fn required(&self) -> Segment {
        match self {
            Segment::Dynamic { name, .. } => Segment::Dynamic {
                name: name.clone(),
                optional: false,
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(text) => f.write_str(text),
            Segment::Dynamic { name, optional } => {
                write!(f, ":{}{}", name, if *optional { "?" } else { "" })
            }
            Segment::Splat => f.write_str("*"),
        }
    }
}

/// Classifies a segment into a [`Segment`] (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Splat**: exactly `*`
/// 2. **Optional param**: `:name?`
/// 3. **Required param**: `:name`
/// 4. **Static**: Any other text
///
/// Empty parameter names are returned as-is; the pattern parser rejects them
/// with the full path for context.
pub fn classify_segment(segment: &str) -> Segment {
    if segment == "*" {
        return Segment::Splat;
    }

    match segment.strip_prefix(':') {
        Some(param) => match param.strip_suffix('?') {
            Some(name) => Segment::Dynamic {
                name: name.to_string(),
                optional: true,
            },
            None => Segment::Dynamic {
                name: param.to_string(),
                optional: false,
            },
        },
        None => Segment::Static(segment.to_string()),
    }
}

/// Renders segments back to a pattern string (`/` for no segments)
///
/// ```
/// use pathway_router::route::pattern::{classify_segment, render_segments};
///
/// let segments = vec![classify_segment("users"), classify_segment(":id?")];
/// assert_eq!(render_segments(&segments), "/users/:id?");
/// assert_eq!(render_segments(&[]), "/");
/// ```
pub fn render_segments(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    segments.iter().fold(String::new(), |mut acc, segment| {
        acc.push('/');
        acc.push_str(&segment.to_string());
        acc
    })
}
