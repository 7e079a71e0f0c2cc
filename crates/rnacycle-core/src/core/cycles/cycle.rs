use crate::core::models::graph::StructureGraph;
use crate::core::models::ids::{InteractionId, ResidueId};
use crate::core::models::residue::ResidueKey;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("Cycle contains no interactions")]
    Empty,

    #[error("Interaction at step {step} does not exist in the graph")]
    UnknownInteraction { step: usize },

    #[error("Interaction at step {step} does not touch residue {residue}")]
    Disconnected { step: usize, residue: String },

    #[error("Walk does not return to its starting residue")]
    NotClosed,

    #[error("Interaction at step {step} is traversed more than once")]
    RepeatedInteraction { step: usize },

    #[error("Recorded weight {recorded} differs from the summed interaction weight {actual}")]
    WeightMismatch { recorded: String, actual: String },
}

/// An ordered closed walk through the residue graph.
///
/// `residues` lists `v0, v1, ..., vk` with `vk == v0`, and `interactions[i]` joins
/// `residues[i]` to `residues[i + 1]`. No interaction appears twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    residues: Vec<ResidueId>,
    interactions: Vec<InteractionId>,
    weight: f64,
}

impl Cycle {
    /// Builds a cycle by walking `interactions` in order, starting at `start`.
    ///
    /// The walk must close on `start` and may not reuse an interaction.
    pub fn from_walk(
        graph: &StructureGraph,
        start: ResidueId,
        interactions: Vec<InteractionId>,
    ) -> Result<Self, CycleError> {
        if interactions.is_empty() {
            return Err(CycleError::Empty);
        }

        let mut residues = Vec::with_capacity(interactions.len() + 1);
        let mut seen = HashSet::with_capacity(interactions.len());
        let mut weight = 0.0;
        let mut current = start;
        residues.push(current);

        for (step, &interaction_id) in interactions.iter().enumerate() {
            let interaction = graph
                .interaction(interaction_id)
                .ok_or(CycleError::UnknownInteraction { step })?;
            if !seen.insert(interaction_id) {
                return Err(CycleError::RepeatedInteraction { step });
            }
            current = interaction
                .opposite(current)
                .ok_or_else(|| CycleError::Disconnected {
                    step,
                    residue: describe(graph, current),
                })?;
            weight += interaction.weight;
            residues.push(current);
        }

        if current != start {
            return Err(CycleError::NotClosed);
        }

        Ok(Self {
            residues,
            interactions,
            weight,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        residues: Vec<ResidueId>,
        interactions: Vec<InteractionId>,
        weight: f64,
    ) -> Self {
        Self {
            residues,
            interactions,
            weight,
        }
    }

    /// Re-checks this cycle against `graph`: every step is a real interaction joining the
    /// listed residues, the walk closes, nothing repeats and the weight adds up.
    pub fn validate(&self, graph: &StructureGraph) -> Result<(), CycleError> {
        let start = *self.residues.first().ok_or(CycleError::Empty)?;
        if self.residues.len() != self.interactions.len() + 1 {
            return Err(CycleError::NotClosed);
        }

        let rebuilt = Self::from_walk(graph, start, self.interactions.clone())?;
        if let Some(step) = rebuilt
            .residues
            .iter()
            .zip(&self.residues)
            .position(|(a, b)| a != b)
        {
            let residue = self
                .residues
                .get(step)
                .map(|&id| describe(graph, id))
                .unwrap_or_default();
            return Err(CycleError::Disconnected {
                step: step.saturating_sub(1),
                residue,
            });
        }

        let tolerance = 1e-9 * rebuilt.weight.abs().max(1.0);
        if (rebuilt.weight - self.weight).abs() > tolerance {
            return Err(CycleError::WeightMismatch {
                recorded: self.weight.to_string(),
                actual: rebuilt.weight.to_string(),
            });
        }
        Ok(())
    }

    /// Residues of the walk, including the closing repeat of the first one.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn interactions(&self) -> &[InteractionId] {
        &self.interactions
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of interactions (equivalently, distinct residues) in the cycle.
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// A two-interaction cycle formed by parallel edges of different kinds.
    pub fn is_degenerate(&self) -> bool {
        self.interactions.len() == 2
    }

    /// External keys of the distinct residues, sorted. Used for deterministic tie-breaking.
    pub fn sorted_keys(&self, graph: &StructureGraph) -> Vec<ResidueKey> {
        let mut keys: Vec<ResidueKey> = self
            .residues
            .iter()
            .skip(1)
            .filter_map(|&id| graph.residue_key(id))
            .collect();
        keys.sort();
        keys
    }
}

fn describe(graph: &StructureGraph, residue_id: ResidueId) -> String {
    graph
        .residue_key(residue_id)
        .map(|key| key.to_string())
        .unwrap_or_else(|| format!("{:?}", residue_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::interaction::{BasePairFamily, Interaction, InteractionKind};
    use crate::core::models::residue::Residue;

    struct Square {
        graph: StructureGraph,
        residues: Vec<ResidueId>,
        edges: Vec<InteractionId>,
    }

    fn square() -> Square {
        let mut graph = StructureGraph::new();
        let residues: Vec<_> = (1..=4)
            .map(|i| {
                graph
                    .add_residue(Residue::new(ResidueKey::new('A', i), "G"))
                    .unwrap()
            })
            .collect();
        let edges = (0..4)
            .map(|i| {
                graph
                    .add_interaction(
                        Interaction::new(
                            residues[i],
                            residues[(i + 1) % 4],
                            InteractionKind::PhosphodiesterBond,
                        )
                        .with_weight(i as f64 + 1.0),
                    )
                    .unwrap()
            })
            .collect();
        Square {
            graph,
            residues,
            edges,
        }
    }

    #[test]
    fn from_walk_builds_closed_cycle_with_summed_weight() {
        let sq = square();
        let cycle = Cycle::from_walk(&sq.graph, sq.residues[0], sq.edges.clone()).unwrap();

        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle.weight(), 10.0);
        assert_eq!(cycle.residues().first(), cycle.residues().last());
        assert_eq!(&cycle.residues()[..4], sq.residues.as_slice());
        assert!(!cycle.is_degenerate());
        assert!(cycle.validate(&sq.graph).is_ok());
    }

    #[test]
    fn from_walk_accepts_reverse_traversal() {
        let sq = square();
        let reversed: Vec<_> = sq.edges.iter().rev().copied().collect();
        let cycle = Cycle::from_walk(&sq.graph, sq.residues[0], reversed).unwrap();
        assert_eq!(cycle.residues()[1], sq.residues[3]);
    }

    #[test]
    fn from_walk_rejects_open_and_broken_walks() {
        let sq = square();
        assert_eq!(
            Cycle::from_walk(&sq.graph, sq.residues[0], vec![]),
            Err(CycleError::Empty)
        );
        assert_eq!(
            Cycle::from_walk(&sq.graph, sq.residues[0], sq.edges[..3].to_vec()),
            Err(CycleError::NotClosed)
        );
        assert!(matches!(
            Cycle::from_walk(&sq.graph, sq.residues[0], vec![sq.edges[1]]),
            Err(CycleError::Disconnected { step: 0, .. })
        ));
        assert_eq!(
            Cycle::from_walk(&sq.graph, sq.residues[0], vec![sq.edges[0], sq.edges[0]]),
            Err(CycleError::RepeatedInteraction { step: 1 })
        );
    }

    #[test]
    fn parallel_edges_of_different_kinds_form_a_degenerate_cycle() {
        let mut sq = square();
        let pair = sq
            .graph
            .add_interaction(Interaction::new(
                sq.residues[1],
                sq.residues[0],
                InteractionKind::BasePair(BasePairFamily::CisWatsonWatson),
            ))
            .unwrap();
        let cycle = Cycle::from_walk(&sq.graph, sq.residues[0], vec![sq.edges[0], pair]).unwrap();
        assert!(cycle.is_degenerate());
        assert_eq!(cycle.weight(), 2.0);
    }

    #[test]
    fn validate_detects_tampered_cycles() {
        let sq = square();
        let mut residues = sq.residues.clone();
        residues.push(sq.residues[0]);

        let wrong_weight = Cycle::from_parts(residues.clone(), sq.edges.clone(), 4.0);
        assert!(matches!(
            wrong_weight.validate(&sq.graph),
            Err(CycleError::WeightMismatch { .. })
        ));

        residues.swap(1, 3);
        let wrong_order = Cycle::from_parts(residues, sq.edges.clone(), 10.0);
        assert!(matches!(
            wrong_order.validate(&sq.graph),
            Err(CycleError::Disconnected { .. })
        ));
    }

    #[test]
    fn sorted_keys_lists_each_residue_once() {
        let sq = square();
        let reversed: Vec<_> = sq.edges.iter().rev().copied().collect();
        let cycle = Cycle::from_walk(&sq.graph, sq.residues[2], {
            let mut walk = reversed;
            walk.rotate_left(2);
            walk
        })
        .unwrap();
        let keys: Vec<_> = (1..=4).map(|i| ResidueKey::new('A', i)).collect();
        assert_eq!(cycle.sorted_keys(&sq.graph), keys);
    }
}
