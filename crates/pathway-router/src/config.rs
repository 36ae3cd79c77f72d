/// Router options and the TOML route manifest
///
/// The manifest is the untyped form of a route tree: every node may claim a
/// path, an index flag and children at once, so it is validated while being
/// converted into [`RouteDefinition`]s.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{RouteConfigError, RouteDefinition, RouteId, RouteKind, RouterError};

/// Options shared by compilation and matching
///
/// # Examples
///
/// ```
/// use pathway_router::RouterOptions;
///
/// let options = RouterOptions::default().with_basename("/app");
/// assert_eq!(options.basename.as_deref(), Some("/app"));
/// assert!(!options.case_sensitive);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Prefix stripped from every pathname before matching
    pub basename: Option<String>,
    /// Router-wide case sensitivity, OR-ed with each route's own flag
    pub case_sensitive: bool,
}

impl RouterOptions {
    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// One node of a route manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub path: Option<String>,
    pub index: bool,
    pub case_sensitive: bool,
    pub name: Option<String>,
    /// Stored as the `title` metadata entry
    pub title: Option<String>,
    pub metadata: HashMap<String, String>,
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    /// Validates this node and its children into a [`RouteDefinition`]
    pub(crate) fn into_definition(self, id: RouteId) -> Result<RouteDefinition, RouteConfigError> {
        let kind = match (self.index, self.path) {
            (true, _) if !self.children.is_empty() => {
                return Err(RouteConfigError::IndexWithChildren { route: id })
            }
            (true, Some(path)) => return Err(RouteConfigError::IndexWithPath { route: id, path }),
            (true, None) => RouteKind::Index,
            (false, None) if self.children.is_empty() => {
                return Err(RouteConfigError::EmptyLayout { route: id })
            }
            (false, None) => RouteKind::Layout {
                children: convert_children(self.children, &id)?,
            },
            (false, Some(path)) => RouteKind::Path {
                path,
                children: convert_children(self.children, &id)?,
            },
        };

        let mut metadata = self.metadata;
        if let Some(title) = self.title {
            metadata.insert("title".to_string(), title);
        }

        Ok(RouteDefinition {
            kind,
            case_sensitive: self.case_sensitive,
            name: self.name,
            metadata,
        })
    }
}

fn convert_children(
    children: Vec<RouteConfig>,
    parent: &RouteId,
) -> Result<Vec<RouteDefinition>, RouteConfigError> {
    children
        .into_iter()
        .enumerate()
        .map(|(idx, child)| child.into_definition(parent.child(idx)))
        .collect()
}

/// A route tree and router options declared in TOML
///
/// # Examples
///
/// ```
/// use pathway_router::RouteManifest;
///
/// let manifest = RouteManifest::from_toml_str(r#"
///     basename = "/app"
///
///     [[routes]]
///     path = "/dash"
///     title = "Dashboard"
///
///     [[routes.children]]
///     index = true
///
///     [[routes.children]]
///     path = "users/:id"
///     name = "user"
/// "#).unwrap();
///
/// let (routes, options) = manifest.into_parts().unwrap();
/// assert_eq!(options.basename.as_deref(), Some("/app"));
/// assert_eq!(routes[0].get_meta("title"), Some("Dashboard"));
/// assert_eq!(routes[0].children().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteManifest {
    pub basename: Option<String>,
    pub case_sensitive: bool,
    pub routes: Vec<RouteConfig>,
}

impl RouteManifest {
    pub fn from_toml_str(source: &str) -> Result<Self, RouterError> {
        Ok(toml::from_str(source)?)
    }

    pub fn options(&self) -> RouterOptions {
        RouterOptions {
            basename: self.basename.clone(),
            case_sensitive: self.case_sensitive,
        }
    }

    /// Validates the declared routes into a route tree
    pub fn into_routes(self) -> Result<Vec<RouteDefinition>, RouterError> {
        let routes = self
            .routes
            .into_iter()
            .enumerate()
            .map(|(idx, route)| route.into_definition(RouteId::root(idx)))
            .collect::<Result<Vec<_>, RouteConfigError>>()?;
        Ok(routes)
    }

    /// Validated route tree together with the manifest's options
    pub fn into_parts(self) -> Result<(Vec<RouteDefinition>, RouterOptions), RouterError> {
        let options = self.options();
        Ok((self.into_routes()?, options))
    }
}
