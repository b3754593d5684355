//! Static territory adjacency.
//!
//! Adjacency tables are hand-authored, so a one-sided entry is easy to write
//! by mistake. The graph is always built as a symmetric relation: every
//! `a -> b` entry implies `b -> a`, and missing mirrors are filled in (and
//! logged) at load time.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ScenarioError;
use crate::game::TerritoryId;

/// Symmetric, load-time-fixed adjacency between territories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: BTreeMap<TerritoryId, BTreeSet<TerritoryId>>,
}

impl AdjacencyGraph {
    /// Build a graph from per-territory neighbor lists.
    ///
    /// `is_known` decides whether an identifier names a real territory.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry references an unknown territory or lists
    /// a territory as its own neighbor.
    pub fn from_lists<F>(
        lists: &BTreeMap<TerritoryId, Vec<TerritoryId>>,
        is_known: F,
    ) -> Result<Self, ScenarioError>
    where
        F: Fn(&TerritoryId) -> bool,
    {
        let mut neighbors: BTreeMap<TerritoryId, BTreeSet<TerritoryId>> = BTreeMap::new();

        for (from, list) in lists {
            if !is_known(from) {
                return Err(ScenarioError::UnknownAdjacency(from.clone()));
            }
            neighbors.entry(from.clone()).or_default();
            for to in list {
                if !is_known(to) {
                    return Err(ScenarioError::UnknownAdjacency(to.clone()));
                }
                if to == from {
                    return Err(ScenarioError::SelfAdjacency(from.clone()));
                }
                neighbors.entry(from.clone()).or_default().insert(to.clone());
            }
        }

        // Mirror one-sided entries.
        let edges: Vec<(TerritoryId, TerritoryId)> = neighbors
            .iter()
            .flat_map(|(a, set)| set.iter().map(move |b| (a.clone(), b.clone())))
            .collect();
        for (a, b) in edges {
            let back = neighbors.entry(b.clone()).or_default();
            if back.insert(a.clone()) {
                log::warn!("adjacency {a} -> {b} had no reverse entry; added {b} -> {a}");
            }
        }

        Ok(Self { neighbors })
    }

    /// Check whether two territories border each other.
    #[must_use]
    pub fn are_adjacent(&self, a: &TerritoryId, b: &TerritoryId) -> bool {
        self.neighbors.get(a).is_some_and(|set| set.contains(b))
    }

    /// Neighbors of a territory, in identifier order. Empty for unknown ids.
    pub fn neighbors_of<'a>(
        &'a self,
        id: &TerritoryId,
    ) -> impl Iterator<Item = &'a TerritoryId> + use<'a> {
        self.neighbors.get(id).into_iter().flatten()
    }

    /// Number of territories with at least one neighbor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.values().filter(|set| !set.is_empty()).count()
    }

    /// Check whether the graph has no edges at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
