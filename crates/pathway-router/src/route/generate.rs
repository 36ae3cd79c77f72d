/// Path generation from a pattern and parameters
use std::collections::HashMap;

use super::parser::parse_pattern;
use super::pattern::{Segment, SPLAT_PARAM};
use crate::PatternError;

/// Generates a pathname by substituting parameters into a pattern
///
/// Maps over pattern segments: static text is kept, dynamic values are
/// percent-encoded, absent optional parameters are dropped and the splat
/// value is appended verbatim.
///
/// # Examples
///
/// ```
/// use pathway_router::generate_path;
/// use std::collections::HashMap;
///
/// let mut params = HashMap::new();
/// params.insert("id".to_string(), "42".to_string());
/// params.insert("*".to_string(), "docs/intro.md".to_string());
///
/// assert_eq!(generate_path("/users/:id", &params).unwrap(), "/users/42");
/// assert_eq!(generate_path("/users/:id/:tab?", &params).unwrap(), "/users/42");
/// assert_eq!(generate_path("/files/*", &params).unwrap(), "/files/docs/intro.md");
/// assert!(generate_path("/teams/:team", &params).is_err());
/// ```
pub fn generate_path(pattern: &str, params: &HashMap<String, String>) -> Result<String, PatternError> {
    let parsed = parse_pattern(pattern)?;

    let pieces: Vec<Option<String>> = parsed
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Static(text) => Ok(Some(text.clone())),
            Segment::Dynamic {
                name,
                optional: false,
            } => params
                .get(name)
                .map(|value| Some(urlencoding::encode(value).into_owned()))
                .ok_or_else(|| PatternError::MissingParam {
                    path: pattern.to_string(),
                    name: name.clone(),
                }),
            Segment::Dynamic {
                name,
                optional: true,
            } => Ok(params
                .get(name)
                .filter(|value| !value.is_empty())
                .map(|value| urlencoding::encode(value).into_owned())),
            Segment::Splat => Ok(params
                .get(SPLAT_PARAM)
                .map(|value| value.trim_matches('/').to_string())
                .filter(|value| !value.is_empty())),
        })
        .collect::<Result<_, _>>()?;

    let present: Vec<String> = pieces.into_iter().flatten().collect();
    if present.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}", present.join("/")))
    }
}
