use super::error::EngineError;
use crate::core::models::graph::StructureGraph;
use crate::core::models::ids::{InteractionId, ResidueId};
use slotmap::SecondaryMap;
use std::collections::VecDeque;
use tracing::debug;

/// The unique path between two residues of the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePath {
    /// Residues from the first endpoint to the second, both included.
    pub residues: Vec<ResidueId>,
    /// Tree interactions traversed, `residues.len() - 1` of them.
    pub interactions: Vec<InteractionId>,
}

#[derive(Debug, Clone, Copy)]
struct TreeLink {
    parent: ResidueId,
    via: InteractionId,
}

/// Breadth-first spanning forest with one tree per connected component.
///
/// Every residue records its parent link, its depth below the component root and the
/// component it belongs to. Interactions are split into tree and non-tree edges.
#[derive(Debug, Clone)]
pub struct SpanningForest {
    roots: Vec<ResidueId>,
    links: SecondaryMap<ResidueId, TreeLink>,
    depths: SecondaryMap<ResidueId, usize>,
    components: SecondaryMap<ResidueId, usize>,
    tree_edges: Vec<InteractionId>,
    tree_edge_set: SecondaryMap<InteractionId, ()>,
    non_tree_edges: Vec<InteractionId>,
}

impl SpanningForest {
    /// Traverses `graph` breadth-first from each unvisited residue in insertion order.
    ///
    /// The result depends only on the graph's insertion order. The only failure is an
    /// internally inconsistent graph, detected by the `|V| - C` tree-edge count.
    pub fn build(graph: &StructureGraph) -> Result<Self, EngineError> {
        let mut forest = Self {
            roots: Vec::new(),
            links: SecondaryMap::new(),
            depths: SecondaryMap::new(),
            components: SecondaryMap::new(),
            tree_edges: Vec::with_capacity(graph.residue_count()),
            tree_edge_set: SecondaryMap::new(),
            non_tree_edges: Vec::new(),
        };

        for (root, _) in graph.residues_iter() {
            if forest.depths.contains_key(root) {
                continue;
            }
            let component = forest.roots.len();
            forest.roots.push(root);
            forest.depths.insert(root, 0);
            forest.components.insert(root, component);

            let mut queue = VecDeque::from([root]);
            while let Some(current) = queue.pop_front() {
                let depth = forest.depths.get(current).copied().unwrap_or_default();
                for (edge, next) in graph.neighbors(current) {
                    if forest.depths.contains_key(next) {
                        continue;
                    }
                    forest.depths.insert(next, depth + 1);
                    forest.components.insert(next, component);
                    forest.links.insert(
                        next,
                        TreeLink {
                            parent: current,
                            via: edge,
                        },
                    );
                    forest.tree_edges.push(edge);
                    forest.tree_edge_set.insert(edge, ());
                    queue.push_back(next);
                }
            }
        }

        forest.non_tree_edges = graph
            .interactions_iter()
            .map(|(id, _)| id)
            .filter(|id| !forest.tree_edge_set.contains_key(*id))
            .collect();

        let expected = graph.residue_count() - forest.roots.len();
        if forest.tree_edges.len() != expected {
            return Err(EngineError::Forest(format!(
                "expected {} tree edges for {} residues in {} components, found {}",
                expected,
                graph.residue_count(),
                forest.roots.len(),
                forest.tree_edges.len()
            )));
        }

        debug!(
            components = forest.roots.len(),
            tree_edges = forest.tree_edges.len(),
            non_tree_edges = forest.non_tree_edges.len(),
            "Built spanning forest"
        );
        Ok(forest)
    }

    /// Tree edges in discovery order.
    pub fn tree_edges(&self) -> &[InteractionId] {
        &self.tree_edges
    }

    /// Non-tree edges in global edge order.
    pub fn non_tree_edges(&self) -> &[InteractionId] {
        &self.non_tree_edges
    }

    pub fn is_tree_edge(&self, edge: InteractionId) -> bool {
        self.tree_edge_set.contains_key(edge)
    }

    pub fn component_count(&self) -> usize {
        self.roots.len()
    }

    pub fn roots(&self) -> &[ResidueId] {
        &self.roots
    }

    pub fn component_of(&self, residue: ResidueId) -> Option<usize> {
        self.components.get(residue).copied()
    }

    pub fn depth(&self, residue: ResidueId) -> Option<usize> {
        self.depths.get(residue).copied()
    }

    /// Parent residue and the tree edge leading to it. `None` for roots and unknown residues.
    pub fn parent(&self, residue: ResidueId) -> Option<(ResidueId, InteractionId)> {
        self.links.get(residue).map(|link| (link.parent, link.via))
    }

    /// Path from `from` to `to` through the tree, meeting at their lowest common ancestor.
    ///
    /// Returns `None` when the residues lie in different components or are unknown.
    pub fn tree_path(&self, from: ResidueId, to: ResidueId) -> Option<TreePath> {
        if self.component_of(from)? != self.component_of(to)? {
            return None;
        }

        let (mut a, mut b) = (from, to);
        let (mut depth_a, mut depth_b) = (self.depth(a)?, self.depth(b)?);
        let mut up_residues = vec![a];
        let mut up_edges = Vec::new();
        let mut down_residues = vec![b];
        let mut down_edges = Vec::new();

        while depth_a > depth_b {
            let (parent, via) = self.parent(a)?;
            up_edges.push(via);
            up_residues.push(parent);
            a = parent;
            depth_a -= 1;
        }
        while depth_b > depth_a {
            let (parent, via) = self.parent(b)?;
            down_edges.push(via);
            down_residues.push(parent);
            b = parent;
            depth_b -= 1;
        }
        while a != b {
            let (parent_a, via_a) = self.parent(a)?;
            let (parent_b, via_b) = self.parent(b)?;
            up_edges.push(via_a);
            up_residues.push(parent_a);
            down_edges.push(via_b);
            down_residues.push(parent_b);
            a = parent_a;
            b = parent_b;
        }

        // Both halves end at the common ancestor; keep it once.
        down_residues.pop();
        up_residues.extend(down_residues.into_iter().rev());
        up_edges.extend(down_edges.into_iter().rev());

        Some(TreePath {
            residues: up_residues,
            interactions: up_edges,
        })
    }
}
