/// Pattern compilation and specificity scoring
///
/// Turns a segment list into a regex-backed matcher plus the score used to
/// rank competing patterns. A compiled pattern is immutable.
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use regex::Regex;

use super::parser::{parse_pattern, validate_segments};
use super::pattern::{render_segments, Segment, SPLAT_PARAM};
use crate::matcher::decode_param;
use crate::path::{normalize_pathname, split_pathname};
use crate::PatternError;

/// Weight of a static segment
pub const STATIC_WEIGHT: usize = 10;
/// Weight of a required dynamic segment
pub const DYNAMIC_WEIGHT: usize = 3;
/// Weight of an optional dynamic segment
pub const OPTIONAL_WEIGHT: usize = 2;
/// Weight of a splat segment; nothing after it is scored
pub const SPLAT_WEIGHT: usize = 1;
/// Credit for patterns that do not end in a splat
pub const NON_SPLAT_BONUS: usize = 2;

/// A segment together with the case sensitivity of the route that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CasedSegment {
    pub segment: Segment,
    pub case_sensitive: bool,
}

/// Raw (undecoded) result of running a compiled pattern
#[derive(Debug)]
pub(crate) struct RawCaptures<'p, 't> {
    /// Parameter name and captured text, `None` for an absent optional
    pub params: Vec<(&'p str, Option<&'t str>)>,
    /// Byte offset of each route boundary in the pathname
    pub boundaries: Vec<usize>,
    /// Byte offset where the splat text starts, if a splat captured text
    pub splat_start: Option<usize>,
}

/// A path pattern compiled into a matcher and a specificity score
///
/// # Examples
///
/// ```
/// use pathway_router::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("/users/:id", false).unwrap();
/// assert_eq!(pattern.param_names(), &["id".to_string()]);
///
/// let params = pattern.matches("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// assert!(pattern.matches("/users").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    path: String,
    segments: Vec<Segment>,
    regex: Regex,
    param_names: Vec<String>,
    boundary_count: usize,
    shape: String,
    score: usize,
    dynamic_count: usize,
}

impl CompiledPattern {
    /// Parses and compiles a single path pattern
    ///
    /// Leading `..` segments of a relative pattern have nothing to climb
    /// into and are ignored.
    pub fn compile(path: &str, case_sensitive: bool) -> Result<Self, PatternError> {
        let parsed = parse_pattern(path)?;
        let segments: Vec<CasedSegment> = parsed
            .segments
            .into_iter()
            .map(|segment| CasedSegment {
                segment,
                case_sensitive,
            })
            .collect();
        let end = segments.len();
        Self::from_segments(segments, &[end], false)
    }

    /// Compiles a joined segment list
    ///
    /// `boundaries` holds, for each route of a branch, the number of segments
    /// consumed once that route has matched. Matching reports the pathname
    /// offset of every boundary.
    ///
    /// With `optionals_present` set, optional segments were already chosen as
    /// present: they must match a pathname segment but still score as
    /// optional.
    pub(crate) fn from_segments(
        segments: Vec<CasedSegment>,
        boundaries: &[usize],
        optionals_present: bool,
    ) -> Result<Self, PatternError> {
        let declared: Vec<Segment> = segments.iter().map(|s| s.segment.clone()).collect();
        let plain: Vec<Segment> = if optionals_present {
            declared.iter().map(Segment::required).collect()
        } else {
            declared.clone()
        };
        let path = render_segments(&plain);
        validate_segments(&path, &plain)?;

        let mut seen = HashSet::new();
        let param_names: Vec<String> = plain
            .iter()
            .filter_map(Segment::param_name)
            .map(str::to_string)
            .collect();
        for name in &param_names {
            if !seen.insert(name.as_str()) {
                return Err(PatternError::DuplicateParam {
                    path: path.clone(),
                    name: name.clone(),
                });
            }
        }

        let regex = Regex::new(&build_regex(&segments, boundaries, optionals_present))?;
        let (score, dynamic_count) = compute_score(&declared);

        Ok(Self {
            path,
            segments: plain,
            regex,
            param_names,
            boundary_count: boundaries.len(),
            shape: pattern_shape(&segments),
            score,
            dynamic_count,
        })
    }

    /// Joined pattern, e.g. `/users/:id`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in left-to-right order (`*` for a splat)
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Pattern with parameter names erased, e.g. `/users/:`
    ///
    /// Two patterns with the same shape accept the same pathnames.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Specificity score, higher ranks first
    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of dynamic (required or optional) segments
    pub fn dynamic_count(&self) -> usize {
        self.dynamic_count
    }

    pub fn ends_in_splat(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Splat))
    }

    /// Tests a pathname without extracting parameters
    ///
    /// Normalized like [`CompiledPattern::matches`]: search, hash, trailing
    /// and duplicate slashes are ignored.
    pub fn is_match(&self, pathname: &str) -> bool {
        let pathname = normalize_pathname(split_pathname(pathname));
        self.regex.is_match(&pathname)
    }

    /// Matches a pathname and returns decoded parameters
    ///
    /// The pathname is normalized first, so trailing and duplicate slashes
    /// are ignored. Absent optional parameters are left out of the map.
    pub fn matches(&self, pathname: &str) -> Option<HashMap<String, String>> {
        let pathname = normalize_pathname(split_pathname(pathname));
        let raw = self.captures(&pathname)?;
        Some(
            raw.params
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name.to_string(), decode_param(v))))
                .collect(),
        )
    }

    /// Runs the regex against an already normalized pathname
    pub(crate) fn captures<'p, 't>(&'p self, pathname: &'t str) -> Option<RawCaptures<'p, 't>> {
        let caps = self.regex.captures(pathname)?;

        let params = self
            .param_names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = caps.name(&format!("p{idx}")).map(|m| m.as_str());
                let value = match (value, name.as_str()) {
                    (None, SPLAT_PARAM) => Some(""),
                    (value, _) => value,
                };
                (name.as_str(), value)
            })
            .collect();

        let boundaries = (0..self.boundary_count)
            .map(|idx| {
                caps.name(&format!("b{idx}"))
                    .map_or(pathname.len(), |m| m.start())
            })
            .collect();

        let splat_start = if self.ends_in_splat() {
            caps.name(&format!("p{}", self.param_names.len() - 1))
                .map(|m| m.start())
        } else {
            None
        };

        Some(RawCaptures {
            params,
            boundaries,
            splat_start,
        })
    }
}

/// Builds the anchored regex source for a segment list
///
/// Static segments are escaped (and wrapped in `(?i:..)` when case
/// insensitive), parameters are named `p0..pn`, route boundaries are empty
/// groups named `b0..bn`.
fn build_regex(segments: &[CasedSegment], boundaries: &[usize], optionals_present: bool) -> String {
    let mut source = String::from("^");
    let mut param_idx = 0;

    let push_boundaries = |source: &mut String, position: usize| {
        for (idx, boundary) in boundaries.iter().enumerate() {
            if (*boundary).min(segments.len()) == position {
                let _ = write!(source, "(?P<b{idx}>)");
            }
        }
    };

    for (position, cased) in segments.iter().enumerate() {
        push_boundaries(&mut source, position);
        match &cased.segment {
            Segment::Static(text) => {
                let escaped = regex::escape(text);
                if cased.case_sensitive {
                    let _ = write!(source, "/{escaped}");
                } else {
                    let _ = write!(source, "/(?i:{escaped})");
                }
            }
            Segment::Dynamic { optional, .. } => {
                let may_be_absent = !optionals_present
                    && *optional
                    && segments[position + 1..]
                        .iter()
                        .all(|s| s.segment.is_optional() || s.segment == Segment::Splat);
                if may_be_absent {
                    let _ = write!(source, "(?:/(?P<p{param_idx}>[^/]+))?");
                } else {
                    let _ = write!(source, "/(?P<p{param_idx}>[^/]+)");
                }
                param_idx += 1;
            }
            Segment::Splat => {
                let _ = write!(source, "(?:/(?P<p{param_idx}>.*))?");
                param_idx += 1;
            }
        }
    }
    push_boundaries(&mut source, segments.len());

    if !matches!(segments.last().map(|s| &s.segment), Some(Segment::Splat)) {
        source.push_str("/?");
    }
    source.push('$');
    source
}

/// Shape of a pattern with parameter names erased
///
/// Static text is lowercased unless its route is case sensitive, so
/// case-insensitive patterns differing only in case share a shape.
pub(crate) fn pattern_shape(segments: &[CasedSegment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }

    segments.iter().fold(String::new(), |mut acc, cased| {
        acc.push('/');
        match &cased.segment {
            Segment::Static(text) if cased.case_sensitive => acc.push_str(text),
            Segment::Static(text) => acc.push_str(&text.to_lowercase()),
            Segment::Dynamic { optional: false, .. } => acc.push(':'),
            Segment::Dynamic { optional: true, .. } => acc.push_str(":?"),
            Segment::Splat => acc.push('*'),
        }
        acc
    })
}

/// Calculates the specificity score and dynamic-segment count (pure function)
///
/// # Weights
///
/// - **Static** → 10
/// - **Dynamic** → 3
/// - **Optional** → 2
/// - **Splat** → 1, and scoring stops
/// - **No trailing splat** → +2
///
/// # Examples
///
/// ```
/// use pathway_router::route::compile::compute_score;
/// use pathway_router::route::parser::parse_pattern;
///
/// let score = |path: &str| compute_score(&parse_pattern(path).unwrap().segments).0;
///
/// assert_eq!(score("/users/me"), 22);
/// assert_eq!(score("/users/:id"), 15);
/// assert_eq!(score("/users/*"), 11);
/// assert_eq!(score("/"), 2);
/// ```
pub fn compute_score(segments: &[Segment]) -> (usize, usize) {
    let mut score = 0;
    let mut dynamic_count = 0;

    for segment in segments {
        match segment {
            Segment::Static(_) => score += STATIC_WEIGHT,
            Segment::Dynamic { optional: false, .. } => {
                score += DYNAMIC_WEIGHT;
                dynamic_count += 1;
            }
            Segment::Dynamic { optional: true, .. } => {
                score += OPTIONAL_WEIGHT;
                dynamic_count += 1;
            }
            Segment::Splat => return (score + SPLAT_WEIGHT, dynamic_count),
        }
    }

    (score + NON_SPLAT_BONUS, dynamic_count)
}
