/// Declared route tree
///
/// A route is exactly one of three shapes, encoded in [`RouteKind`]:
/// an index route (no path, no children), a layout route (no path, children)
/// or a path route (path, optional children).
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// The shape of a declared route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteKind {
    /// Renders at its parent's path, contributes no segment of its own
    Index,
    /// Pathless grouping of children
    Layout { children: Vec<RouteDefinition> },
    /// Route with its own (absolute or relative) path
    Path {
        path: String,
        children: Vec<RouteDefinition>,
    },
}

/// A node in the declared route tree
///
/// Built with the constructors below and refined with the `with_*` builders.
///
/// # Examples
///
/// ```
/// use pathway_router::RouteDefinition;
///
/// let routes = vec![RouteDefinition::nested(
///     "/dash",
///     vec![
///         RouteDefinition::index().with_meta("title", "Overview"),
///         RouteDefinition::path("users/:id").with_name("user"),
///     ],
/// )];
///
/// assert_eq!(routes[0].own_path(), Some("/dash"));
/// assert_eq!(routes[0].children().len(), 2);
/// assert!(routes[0].children()[0].is_index());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    pub kind: RouteKind,
    /// Static segments of this route's own path compare case-sensitively
    pub case_sensitive: bool,
    /// Optional name for lookups by the rendering layer
    pub name: Option<String>,
    /// Inert data carried through matching (title, permissions, ...)
    pub metadata: HashMap<String, String>,
}

impl RouteDefinition {
    fn with_kind(kind: RouteKind) -> Self {
        Self {
            kind,
            case_sensitive: false,
            name: None,
            metadata: HashMap::new(),
        }
    }

    /// Index route: matches exactly its parent's path
    pub fn index() -> Self {
        Self::with_kind(RouteKind::Index)
    }

    /// Childless path route
    pub fn path(path: impl Into<String>) -> Self {
        Self::nested(path, Vec::new())
    }

    /// Path route with children
    pub fn nested(path: impl Into<String>, children: Vec<RouteDefinition>) -> Self {
        Self::with_kind(RouteKind::Path {
            path: path.into(),
            children,
        })
    }

    /// Pathless layout route
    pub fn layout(children: Vec<RouteDefinition>) -> Self {
        Self::with_kind(RouteKind::Layout { children })
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a metadata key-value pair
    ///
    /// ```
    /// use pathway_router::RouteDefinition;
    ///
    /// let route = RouteDefinition::path("users/:id")
    ///     .with_meta("title", "User Profile")
    ///     .with_meta("permission", "users.read");
    ///
    /// assert_eq!(route.get_meta("title"), Some("User Profile"));
    /// assert_eq!(route.get_meta("missing"), None);
    /// ```
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Own path of a path route; `None` for index and layout routes
    pub fn own_path(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::Path { path, .. } => Some(path),
            RouteKind::Index | RouteKind::Layout { .. } => None,
        }
    }

    pub fn children(&self) -> &[RouteDefinition] {
        match &self.kind {
            RouteKind::Index => &[],
            RouteKind::Layout { children } | RouteKind::Path { children, .. } => children,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, RouteKind::Index)
    }

    /// Index routes and childless path routes end a branch
    pub fn is_leaf(&self) -> bool {
        match &self.kind {
            RouteKind::Index => true,
            RouteKind::Layout { .. } => false,
            RouteKind::Path { children, .. } => children.is_empty(),
        }
    }
}

/// Stable identifier of a route, derived from its position in the tree
///
/// The root-level route at index 2 is `2`, its second child is `2-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct RouteId(Vec<usize>);

impl RouteId {
    pub(crate) fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub(crate) fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Positions from the root level down to this route
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for position in &self.0 {
            if !first {
                f.write_str("-")?;
            }
            write!(f, "{position}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.to_string()
    }
}
