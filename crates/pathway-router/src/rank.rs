/// Branch ranking
///
/// Orders flattened branches so that the most specific pattern is tried
/// first:
///
/// 1. higher specificity score
/// 2. fewer dynamic segments
/// 3. an index leaf before a non-index branch with the same pattern shape
/// 4. declaration order
use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::flatten::RouteBranch;
use crate::{RouteId, RouterOptions};

/// Two branches that accept exactly the same pathnames
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    /// Pattern shape shared by both branches, e.g. `/users/:`
    pub shape: String,
    /// Leaf of the branch that wins (declared first)
    pub winner: RouteId,
    /// Leaf of the branch that can never match
    pub shadowed: RouteId,
}

/// Flattened branches sorted by specificity
///
/// Built by [`crate::compile`]. Borrows the route tree it was built from.
#[derive(Debug, Clone)]
pub struct RankedBranches<'a> {
    branches: Vec<RouteBranch<'a>>,
    options: RouterOptions,
    ambiguities: Vec<Ambiguity>,
}

impl<'a> RankedBranches<'a> {
    /// Sorts branches and records ambiguous pairs
    pub fn new(branches: Vec<RouteBranch<'a>>, options: RouterOptions) -> Self {
        let ambiguities = find_ambiguities(&branches);
        for ambiguity in &ambiguities {
            warn!(
                shape = %ambiguity.shape,
                winner = %ambiguity.winner,
                shadowed = %ambiguity.shadowed,
                "ambiguous routes: shadowed route can never match"
            );
        }

        let branches = rank_branches(branches);
        debug!(branches = branches.len(), "ranked route branches");

        Self {
            branches,
            options,
            ambiguities,
        }
    }

    pub fn branches(&self) -> &[RouteBranch<'a>] {
        &self.branches
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Pairs of branches that accept identical pathnames
    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Sorts branches by specificity (pure function)
///
/// The sort key is total: an index branch borrows the declaration position
/// of the first branch sharing its shape, then wins the tie on the index
/// flag.
pub fn rank_branches(branches: Vec<RouteBranch<'_>>) -> Vec<RouteBranch<'_>> {
    let mut first_by_shape: HashMap<String, usize> = HashMap::new();
    let shapes: Vec<String> = branches
        .iter()
        .map(|branch| {
            let shape = branch.pattern().shape().to_string();
            first_by_shape.entry(shape.clone()).or_insert(branch.order());
            shape
        })
        .collect();

    let mut keyed: Vec<_> = branches
        .into_iter()
        .zip(shapes)
        .map(|(branch, shape)| {
            let position = if branch.is_index() {
                first_by_shape.get(&shape).copied().unwrap_or(branch.order())
            } else {
                branch.order()
            };
            let key = (
                Reverse(branch.pattern().score()),
                branch.pattern().dynamic_count(),
                position,
                !branch.is_index(),
                branch.order(),
            );
            (key, branch)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, branch)| branch).collect()
}

/// Finds branches from different routes with the same shape and index flag
fn find_ambiguities(branches: &[RouteBranch<'_>]) -> Vec<Ambiguity> {
    let mut seen: HashMap<(String, bool), &RouteId> = HashMap::new();
    let mut ambiguities = Vec::new();

    for branch in branches {
        let shape = branch.pattern().shape().to_string();
        let leaf = &branch.leaf().id;
        match seen.get(&(shape.clone(), branch.is_index())) {
            Some(winner) if *winner != leaf => ambiguities.push(Ambiguity {
                shape,
                winner: (*winner).clone(),
                shadowed: leaf.clone(),
            }),
            Some(_) => {}
            None => {
                seen.insert((shape, branch.is_index()), leaf);
            }
        }
    }

    ambiguities
}
