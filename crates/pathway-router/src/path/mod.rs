/// Path utilities for pathname normalization, basenames and joining
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
use std::borrow::Cow;

/// Returns the pathname part of a URL path, dropping `?search` and `#hash`
///
/// # Examples
///
/// ```
/// use pathway_router::path::split_pathname;
///
/// assert_eq!(split_pathname("/users/3?tab=posts#top"), "/users/3");
/// assert_eq!(split_pathname("/users/3#top"), "/users/3");
/// assert_eq!(split_pathname("/users/3"), "/users/3");
/// ```
pub fn split_pathname(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |end| &url[..end])
}

/// Checks if a pathname is already in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use pathway_router::path::is_normalized;
///
/// assert!(is_normalized("/"));
/// assert!(is_normalized("/users/123"));
///
/// assert!(!is_normalized(""));
/// assert!(!is_normalized("about"));
/// assert!(!is_normalized("/about/"));
/// assert!(!is_normalized("/about//page"));
/// ```
pub fn is_normalized(path: &str) -> bool {
    // Must start with / and contain no empty segment (short-circuit)
    if !path.starts_with('/') || path.contains("//") {
        return false;
    }

    // Root is always valid, anything else must not end with /
    path == "/" || !path.ends_with('/')
}

/// Normalize a pathname to canonical form
///
/// **Pure function** with zero-copy optimization using `Cow<'_, str>`.
/// Returns `Cow::Borrowed` when input is already canonical.
///
/// - Trailing slashes: `/path/` → `/path`
/// - Duplicate slashes: `/path//to` → `/path/to`
/// - Missing leading slash: `path` → `/path`
/// - Empty input: `` → `/`
///
/// # Examples
///
/// ```
/// use pathway_router::path::normalize_pathname;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_pathname("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_pathname("/about/"), "/about");
/// assert_eq!(normalize_pathname("path//to///page"), "/path/to/page");
/// assert_eq!(normalize_pathname(""), "/");
/// ```
pub fn normalize_pathname(path: &str) -> Cow<'_, str> {
    // Fast path: already canonical, return borrowed (zero-copy)
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }

    // Slow path: split → filter → collect → join
    let normalized = path
        .split('/')
        .filter(|s| !s.is_empty()) // Drop empty segments
        .collect::<Vec<_>>()
        .join("/");

    // Handle root case
    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Normalize a basename: leading slash, no trailing slash, `/` when empty
///
/// ```
/// use pathway_router::path::normalize_basename;
///
/// assert_eq!(normalize_basename("app/"), "/app");
/// assert_eq!(normalize_basename(""), "/");
/// ```
pub fn normalize_basename(basename: &str) -> Cow<'_, str> {
    normalize_pathname(basename)
}

/// Strips a basename from the front of a pathname
///
/// The comparison ignores ASCII case and only succeeds on a segment boundary,
/// so `/app` strips `/app/users` and `/APP` but not `/application`.
/// Returns `None` when the pathname lies outside the basename.
///
/// # Examples
///
/// ```
/// use pathway_router::path::strip_basename;
///
/// assert_eq!(strip_basename("/app/users/3", "/app"), Some("/users/3"));
/// assert_eq!(strip_basename("/app", "/app"), Some("/"));
/// assert_eq!(strip_basename("/application", "/app"), None);
/// assert_eq!(strip_basename("/other/users/3", "/app"), None);
/// assert_eq!(strip_basename("/users", "/"), Some("/users"));
/// ```
pub fn strip_basename<'a>(pathname: &'a str, basename: &str) -> Option<&'a str> {
    let basename = normalize_basename(basename);
    if basename == "/" {
        return Some(pathname);
    }

    // `get` fails on a char boundary inside the prefix, which is a mismatch too
    let prefix = pathname.get(..basename.len())?;
    if !prefix.eq_ignore_ascii_case(&basename) {
        return None;
    }

    // The basename must end on a segment boundary
    let rest = &pathname[basename.len()..];
    match rest.chars().next() {
        None => Some("/"),
        Some('/') => Some(rest),
        Some(_) => None,
    }
}

/// Joins path pieces with `/`, collapsing duplicate slashes
///
/// ```
/// use pathway_router::path::join_paths;
///
/// assert_eq!(join_paths(&["/dash", "users", ":id"]), "/dash/users/:id");
/// assert_eq!(join_paths(&["/dash/", "/users"]), "/dash/users");
/// assert_eq!(join_paths(&["/", ""]), "/");
/// ```
pub fn join_paths(paths: &[&str]) -> String {
    let joined = paths.join("/");
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Resolves `to` against the pathname `from`
///
/// Absolute targets ignore `from`. `.` segments are dropped and `..` removes
/// one segment, never climbing above the root.
///
/// # Examples
///
/// ```
/// use pathway_router::path::resolve_path;
///
/// assert_eq!(resolve_path("settings", "/dash"), "/dash/settings");
/// assert_eq!(resolve_path("../users/3", "/dash/teams"), "/dash/users/3");
/// assert_eq!(resolve_path("/about", "/dash"), "/about");
/// assert_eq!(resolve_path("../../..", "/a"), "/");
/// ```
pub fn resolve_path(to: &str, from: &str) -> String {
    let mut segments: Vec<&str> = if to.starts_with('/') {
        Vec::new()
    } else {
        from.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in to.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_normalized() {
        assert!(is_normalized("/"));
        assert!(is_normalized("/about"));
        assert!(is_normalized("/blog/posts/hello-world"));

        assert!(!is_normalized(""));
        assert!(!is_normalized("about"));
        assert!(!is_normalized("/about/"));
        assert!(!is_normalized("/about//page"));
    }

    #[test]
    fn test_normalize_pathname_valid() {
        let path = normalize_pathname("/about");
        assert!(matches!(path, Cow::Borrowed("/about")));

        let path = normalize_pathname("/");
        assert!(matches!(path, Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_pathname_trailing_slash() {
        assert_eq!(normalize_pathname("/about/"), "/about");
        assert_eq!(normalize_pathname("/users/123///"), "/users/123");
    }

    #[test]
    fn test_normalize_pathname_double_slash() {
        assert_eq!(normalize_pathname("//about//page"), "/about/page");
    }

    #[test]
    fn test_strip_basename_ignores_case() {
        assert_eq!(strip_basename("/APP/users", "/app"), Some("/users"));
        assert_eq!(strip_basename("/app/users", "app/"), Some("/users"));
    }

    #[test]
    fn test_strip_basename_shorter_pathname() {
        assert_eq!(strip_basename("/ap", "/app"), None);
        assert_eq!(strip_basename("/", "/app"), None);
    }

    #[test]
    fn test_split_pathname_only_query() {
        assert_eq!(split_pathname("?q=1"), "");
    }

    #[test]
    fn test_resolve_path_dot_segments() {
        assert_eq!(resolve_path("./team/./members", "/org"), "/org/team/members");
        assert_eq!(resolve_path("", "/org/"), "/org");
    }
}
