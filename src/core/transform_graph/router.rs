use crate::core::error::TransformError;
use crate::core::transform_graph::pruned::PrunedGraph;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// An ordered sequence of formats joined by registered edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    formats: Vec<String>,
}

impl Route {
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn source(&self) -> &str {
        &self.formats[0]
    }

    pub fn destination(&self) -> &str {
        &self.formats[self.formats.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.formats.len() - 1
    }

    /// Consecutive `(source, destination)` pairs in execution order.
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.formats
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formats.join(" -> "))
    }
}

/// Find the shortest route between two formats.
///
/// Breadth-first search visiting neighbours in name order; the first discovery
/// of a node fixes its predecessor. Among equally short routes this yields the
/// lexicographically smallest one.
pub fn find_path(graph: &PrunedGraph, from: &str, to: &str) -> Result<Route, TransformError> {
    let start = graph
        .index_of(from)
        .ok_or_else(|| TransformError::unknown_format(from))?;
    let goal = graph
        .index_of(to)
        .ok_or_else(|| TransformError::unknown_format(to))?;

    if start == goal {
        return Ok(Route {
            formats: vec![from.to_string()],
        });
    }

    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in graph.sorted_neighbors(current) {
            if next == start || predecessors.contains_key(&next) {
                continue;
            }
            predecessors.insert(next, current);
            if next == goal {
                return Ok(build_route(graph, &predecessors, start, goal));
            }
            queue.push_back(next);
        }
    }

    Err(TransformError::no_path(from, to))
}

fn build_route(
    graph: &PrunedGraph,
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    goal: NodeIndex,
) -> Route {
    let mut formats = vec![graph.name_of(goal).to_string()];
    let mut cursor = goal;
    while cursor != start {
        cursor = predecessors[&cursor];
        formats.push(graph.name_of(cursor).to_string());
    }
    formats.reverse();
    Route { formats }
}
