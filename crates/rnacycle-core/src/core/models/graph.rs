use super::ids::{InteractionId, ResidueId};
use super::interaction::{Interaction, InteractionKind};
use super::residue::{Residue, ResidueKey};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("Residue {0} already exists in the graph")]
    DuplicateVertex(ResidueKey),

    #[error("Interaction references unknown residue {0}")]
    UnknownVertex(String),

    #[error("Self-loop on residue {0} is not permitted")]
    SelfLoop(ResidueKey),

    #[error("Duplicate '{kind}' interaction between {a} and {b}")]
    DuplicateEdge {
        a: ResidueKey,
        b: ResidueKey,
        kind: InteractionKind,
    },

    #[error("Invalid interaction weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },
}

/// Undirected residue interaction graph of a nucleic-acid structure.
///
/// Residues and interactions live in slot-map arenas and refer to each other only through
/// their keys. Interactions additionally carry a dense column index (their insertion order),
/// which fixes the global edge ordering used by GF(2) incidence vectors.
///
/// The graph only grows: a failed `add_*` call leaves it exactly as it was, and nothing is
/// ever removed, so iteration order is insertion order and stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct StructureGraph {
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for interactions.
    interactions: SlotMap<InteractionId, Interaction>,
    /// Interactions in insertion order; position in this list is the edge column.
    interaction_order: Vec<InteractionId>,
    /// Reverse lookup from interaction to edge column.
    edge_columns: SecondaryMap<InteractionId, usize>,
    /// Incident interactions per residue, in insertion order.
    adjacency: SecondaryMap<ResidueId, Vec<InteractionId>>,
    /// Lookup map for finding residues by their external key.
    residue_key_map: HashMap<ResidueKey, ResidueId>,
    /// Registered (unordered pair, kind) combinations, for duplicate detection.
    pair_kinds: HashSet<(ResidueId, ResidueId, InteractionKind)>,
}

impl StructureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a residue, rejecting keys that are already present.
    pub fn add_residue(&mut self, residue: Residue) -> Result<ResidueId, GraphError> {
        if self.residue_key_map.contains_key(&residue.key) {
            return Err(GraphError::DuplicateVertex(residue.key));
        }
        let key = residue.key;
        let residue_id = self.residues.insert(residue);
        self.adjacency.insert(residue_id, Vec::new());
        self.residue_key_map.insert(key, residue_id);
        Ok(residue_id)
    }

    /// Adds an interaction between two existing residues.
    ///
    /// All checks run before anything is mutated.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if either endpoint is not in the graph.
    /// - [`GraphError::SelfLoop`] if both endpoints are the same residue.
    /// - [`GraphError::InvalidWeight`] if the weight is negative, infinite or NaN.
    /// - [`GraphError::DuplicateEdge`] if an interaction of the same kind already joins the
    ///   same unordered pair.
    pub fn add_interaction(
        &mut self,
        interaction: Interaction,
    ) -> Result<InteractionId, GraphError> {
        let (a, b) = interaction.endpoints();
        let key_a = self.require_key(a)?;
        let key_b = self.require_key(b)?;

        if a == b {
            return Err(GraphError::SelfLoop(key_a));
        }
        if !interaction.weight.is_finite() || interaction.weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                weight: interaction.weight,
            });
        }

        let (lo, hi) = interaction.unordered_endpoints();
        let pair_kind = (lo, hi, interaction.kind.clone());
        if self.pair_kinds.contains(&pair_kind) {
            return Err(GraphError::DuplicateEdge {
                a: key_a,
                b: key_b,
                kind: interaction.kind,
            });
        }

        let interaction_id = self.interactions.insert(interaction);
        self.pair_kinds.insert(pair_kind);
        self.edge_columns
            .insert(interaction_id, self.interaction_order.len());
        self.interaction_order.push(interaction_id);
        if let Some(incident) = self.adjacency.get_mut(a) {
            incident.push(interaction_id);
        }
        if let Some(incident) = self.adjacency.get_mut(b) {
            incident.push(interaction_id);
        }
        Ok(interaction_id)
    }

    fn require_key(&self, residue_id: ResidueId) -> Result<ResidueKey, GraphError> {
        self.residues
            .get(residue_id)
            .map(|r| r.key)
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", residue_id)))
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn interaction(&self, id: InteractionId) -> Option<&Interaction> {
        self.interactions.get(id)
    }

    pub fn residue_key(&self, id: ResidueId) -> Option<ResidueKey> {
        self.residues.get(id).map(|r| r.key)
    }

    pub fn find_residue(&self, key: &ResidueKey) -> Option<ResidueId> {
        self.residue_key_map.get(key).copied()
    }

    /// Returns an iterator over all residues in insertion order.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Returns an iterator over all interactions in global edge order.
    pub fn interactions_iter(&self) -> impl Iterator<Item = (InteractionId, &Interaction)> {
        self.interaction_order
            .iter()
            .filter_map(|&id| self.interactions.get(id).map(|i| (id, i)))
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn interaction_count(&self) -> usize {
        self.interaction_order.len()
    }

    pub fn contains_residue(&self, id: ResidueId) -> bool {
        self.residues.contains_key(id)
    }

    /// Interactions touching `residue_id`, in insertion order. Empty for unknown residues.
    pub fn incident(&self, residue_id: ResidueId) -> &[InteractionId] {
        self.adjacency
            .get(residue_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Incident interactions of `residue_id` paired with the residue across each of them.
    pub fn neighbors(
        &self,
        residue_id: ResidueId,
    ) -> impl Iterator<Item = (InteractionId, ResidueId)> + '_ {
        self.incident(residue_id).iter().filter_map(move |&edge| {
            self.interactions
                .get(edge)
                .and_then(|i| i.opposite(residue_id))
                .map(|other| (edge, other))
        })
    }

    /// Residue across `interaction_id` from `residue_id`, if that interaction touches it.
    pub fn opposite(
        &self,
        interaction_id: InteractionId,
        residue_id: ResidueId,
    ) -> Option<ResidueId> {
        self.interactions
            .get(interaction_id)
            .and_then(|i| i.opposite(residue_id))
    }

    pub fn has_interaction(&self, a: ResidueId, b: ResidueId, kind: &InteractionKind) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.pair_kinds.contains(&(lo, hi, kind.clone()))
    }

    /// Position of an interaction in the global edge order.
    pub fn edge_column(&self, id: InteractionId) -> Option<usize> {
        self.edge_columns.get(id).copied()
    }

    pub fn interaction_at(&self, column: usize) -> Option<InteractionId> {
        self.interaction_order.get(column).copied()
    }

    /// Partitions residues into connected components by breadth-first traversal.
    ///
    /// Components are listed in order of their first residue; residues within a component
    /// appear in discovery order.
    pub fn components(&self) -> Vec<Vec<ResidueId>> {
        let mut visited: SecondaryMap<ResidueId, ()> = SecondaryMap::new();
        let mut components = Vec::new();

        for (start, _) in self.residues.iter() {
            if visited.contains_key(start) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            visited.insert(start, ());

            while let Some(current) = queue.pop_front() {
                component.push(current);
                for (_, next) in self.neighbors(current) {
                    if visited.insert(next, ()).is_none() {
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    pub fn component_count(&self) -> usize {
        self.components().len()
    }

    /// Dimension of the cycle space, `|E| - |V| + C`.
    pub fn cycle_space_dimension(&self) -> usize {
        (self.interaction_count() + self.component_count()).saturating_sub(self.residue_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::interaction::BasePairFamily;

    fn key(n: isize) -> ResidueKey {
        ResidueKey::new('A', n)
    }

    fn graph_with_residues(n: isize) -> (StructureGraph, Vec<ResidueId>) {
        let mut graph = StructureGraph::new();
        let ids = (1..=n)
            .map(|i| graph.add_residue(Residue::new(key(i), "A")).unwrap())
            .collect();
        (graph, ids)
    }

    fn backbone(a: ResidueId, b: ResidueId) -> Interaction {
        Interaction::new(a, b, InteractionKind::PhosphodiesterBond)
    }

    mod construction {
        use super::*;

        #[test]
        fn add_residue_rejects_duplicate_keys() {
            let (mut graph, _) = graph_with_residues(2);
            let result = graph.add_residue(Residue::new(key(1), "G"));
            assert_eq!(result, Err(GraphError::DuplicateVertex(key(1))));
            assert_eq!(graph.residue_count(), 2);
        }

        #[test]
        fn add_interaction_rejects_unknown_residues() {
            let (mut graph, ids) = graph_with_residues(1);
            let (_, other_ids) = graph_with_residues(3);

            let stray = other_ids[2];
            let result = graph.add_interaction(backbone(ids[0], stray));
            assert!(matches!(result, Err(GraphError::UnknownVertex(_))));
            assert_eq!(graph.interaction_count(), 0);
        }

        #[test]
        fn add_interaction_rejects_self_loops() {
            let (mut graph, ids) = graph_with_residues(1);
            let result = graph.add_interaction(backbone(ids[0], ids[0]));
            assert_eq!(result, Err(GraphError::SelfLoop(key(1))));
        }

        #[test]
        fn add_interaction_rejects_invalid_weights() {
            let (mut graph, ids) = graph_with_residues(2);
            for weight in [-1.0, f64::NAN, f64::INFINITY] {
                let result = graph.add_interaction(backbone(ids[0], ids[1]).with_weight(weight));
                assert!(matches!(result, Err(GraphError::InvalidWeight { .. })));
            }
            assert_eq!(graph.interaction_count(), 0);
            assert!(graph.incident(ids[0]).is_empty());
        }

        #[test]
        fn add_interaction_rejects_same_kind_in_either_orientation() {
            let (mut graph, ids) = graph_with_residues(2);
            graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            let result = graph.add_interaction(backbone(ids[1], ids[0]));
            assert_eq!(
                result,
                Err(GraphError::DuplicateEdge {
                    a: key(2),
                    b: key(1),
                    kind: InteractionKind::PhosphodiesterBond,
                })
            );
            assert_eq!(graph.interaction_count(), 1);
            assert_eq!(graph.incident(ids[0]).len(), 1);
        }

        #[test]
        fn add_interaction_allows_parallel_edges_of_different_kinds() {
            let (mut graph, ids) = graph_with_residues(2);
            graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            graph
                .add_interaction(Interaction::new(
                    ids[0],
                    ids[1],
                    InteractionKind::BasePair(BasePairFamily::CisWatsonWatson),
                ))
                .unwrap();
            assert_eq!(graph.interaction_count(), 2);
            assert_eq!(graph.incident(ids[0]).len(), 2);
            assert!(graph.has_interaction(ids[1], ids[0], &InteractionKind::PhosphodiesterBond));
            assert!(!graph.has_interaction(ids[0], ids[1], &InteractionKind::Stacking));
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn edge_columns_follow_insertion_order() {
            let (mut graph, ids) = graph_with_residues(3);
            let e0 = graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            let e1 = graph.add_interaction(backbone(ids[1], ids[2])).unwrap();
            assert_eq!(graph.edge_column(e0), Some(0));
            assert_eq!(graph.edge_column(e1), Some(1));
            assert_eq!(graph.interaction_at(1), Some(e1));
            assert_eq!(graph.interaction_at(2), None);

            let order: Vec<_> = graph.interactions_iter().map(|(id, _)| id).collect();
            assert_eq!(order, vec![e0, e1]);
        }

        #[test]
        fn neighbors_report_edge_and_opposite_residue() {
            let (mut graph, ids) = graph_with_residues(3);
            let e0 = graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            let e1 = graph.add_interaction(backbone(ids[2], ids[1])).unwrap();

            let around_middle: Vec<_> = graph.neighbors(ids[1]).collect();
            assert_eq!(around_middle, vec![(e0, ids[0]), (e1, ids[2])]);
            assert_eq!(graph.find_residue(&key(3)), Some(ids[2]));
            assert_eq!(graph.residue_key(ids[0]), Some(key(1)));
        }

        #[test]
        fn components_partition_disconnected_graphs() {
            let (mut graph, ids) = graph_with_residues(5);
            graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            graph.add_interaction(backbone(ids[2], ids[3])).unwrap();

            let components = graph.components();
            assert_eq!(components.len(), 3);
            assert_eq!(components[0], vec![ids[0], ids[1]]);
            assert_eq!(components[1], vec![ids[2], ids[3]]);
            assert_eq!(components[2], vec![ids[4]]);
        }

        #[test]
        fn cycle_space_dimension_counts_independent_loops() {
            let (mut graph, ids) = graph_with_residues(4);
            assert_eq!(graph.cycle_space_dimension(), 0);

            graph.add_interaction(backbone(ids[0], ids[1])).unwrap();
            graph.add_interaction(backbone(ids[1], ids[2])).unwrap();
            graph.add_interaction(backbone(ids[2], ids[3])).unwrap();
            assert_eq!(graph.cycle_space_dimension(), 0);

            graph
                .add_interaction(Interaction::new(ids[3], ids[0], InteractionKind::Stacking))
                .unwrap();
            assert_eq!(graph.cycle_space_dimension(), 1);

            graph
                .add_interaction(Interaction::new(ids[0], ids[2], InteractionKind::Stacking))
                .unwrap();
            assert_eq!(graph.cycle_space_dimension(), 2);
        }

        #[test]
        fn empty_graph_has_no_components() {
            let graph = StructureGraph::new();
            assert_eq!(graph.component_count(), 0);
            assert_eq!(graph.cycle_space_dimension(), 0);
            assert!(graph.incident(ResidueId::default()).is_empty());
        }
    }
}
