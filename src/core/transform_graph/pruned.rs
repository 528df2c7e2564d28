use crate::core::transform_graph::descriptor::TransformationGraph;
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap};

/// Weight carried by every edge of the pruned graph.
pub const EDGE_WEIGHT: u32 = 1;

/// Topology-only view of a [`TransformationGraph`] used for routing.
///
/// Edge functions, docs and file formats are dropped. Edges pointing at a
/// format that is not registered are skipped, so such targets stay unroutable.
#[derive(Debug, Clone, Default)]
pub struct PrunedGraph {
    graph: DiGraph<String, u32>,
    nodes: HashMap<String, NodeIndex>,
}

impl PrunedGraph {
    pub fn from_graph(source: &TransformationGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for name in source.names() {
            let idx = graph.add_node(name.to_string());
            nodes.insert(name.to_string(), idx);
        }

        for descriptor in source.descriptors() {
            let from = nodes[&descriptor.name];
            for target in descriptor.targets() {
                if let Some(&to) = nodes.get(target) {
                    graph.add_edge(from, to, EDGE_WEIGHT);
                }
            }
        }

        Self { graph, nodes }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Outgoing neighbours of a node sorted by format name.
    pub(crate) fn sorted_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        neighbors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        neighbors.dedup();
        neighbors
    }

    /// Adjacency as `name -> (name -> weight)`, in registration order.
    pub fn adjacency(&self) -> IndexMap<String, BTreeMap<String, u32>> {
        let mut adjacency = IndexMap::new();
        for idx in self.graph.node_indices() {
            let targets = self
                .graph
                .neighbors(idx)
                .map(|n| (self.graph[n].clone(), EDGE_WEIGHT))
                .collect();
            adjacency.insert(self.graph[idx].clone(), targets);
        }
        adjacency
    }
}
