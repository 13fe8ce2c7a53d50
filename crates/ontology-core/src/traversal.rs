//! Distance-bounded relatedness search over the parent → child edges.

use crate::store::ConceptStore;
use std::collections::{HashSet, VecDeque};

/// Default hop limit for [`ConceptStore::find_related_concepts`].
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Which edges a traversal may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Parent → child edges only (descendants).
    #[default]
    Downstream,
    /// Child → parent edges only (ancestors).
    Upstream,
    /// Either way, treating the graph as undirected.
    Both,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" | "downstream" => Ok(Self::Downstream),
            "up" | "upstream" => Ok(Self::Upstream),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown direction '{}', expected down, up or both",
                other
            )),
        }
    }
}

impl ConceptStore {
    /// Concepts reachable from `name` along forward edges within `max_distance` hops,
    /// nearest first. `name` itself is never included.
    pub fn find_related_concepts(&self, name: &str, max_distance: usize) -> Vec<String> {
        self.find_related_concepts_in(name, max_distance, Direction::Downstream)
    }

    pub fn find_related_concepts_in(
        &self,
        name: &str,
        max_distance: usize,
        direction: Direction,
    ) -> Vec<String> {
        self.related_with_distance(name, max_distance, direction)
            .into_iter()
            .map(|(n, _)| n)
            .collect()
    }

    /// BFS from `name`, returning `(concept, shortest distance)` pairs in
    /// ascending distance. Ties keep name order within each parent.
    ///
    /// A parent that concepts point at but that was never added is still a
    /// node: it can start a search and is reached walking upstream.
    pub fn related_with_distance(
        &self,
        name: &str,
        max_distance: usize,
        direction: Direction,
    ) -> Vec<(String, usize)> {
        if !self.is_node(name) {
            return Vec::new();
        }

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(name);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        queue.push_back((name, 0));
        let mut related = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_distance {
                continue;
            }
            for neighbor in self.neighbors(current, direction) {
                if visited.insert(neighbor) {
                    related.push((neighbor.to_string(), depth + 1));
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        related
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let mut out = Vec::new();
        if matches!(direction, Direction::Upstream | Direction::Both)
            && let Some(parent) = self.get_concept(name).and_then(|c| c.parent.as_deref())
        {
            out.push(parent);
        }
        if matches!(direction, Direction::Downstream | Direction::Both) {
            out.extend(self.edge_children(name).iter().map(String::as_str));
        }
        out
    }
}
