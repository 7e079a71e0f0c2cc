use super::deadline::Deadline;
use super::error::EngineError;
use super::forest::SpanningForest;
use crate::core::cycles::cycle::Cycle;
use crate::core::models::graph::StructureGraph;
use tracing::debug;

/// Closes every non-tree edge `(u, v)` with the tree path from `v` to `u`.
///
/// Each cycle owns a non-tree edge no other cycle contains, so the result is independent and
/// spans the cycle space without any elimination. Cycles follow the global order of their
/// defining edges.
pub fn generate(
    graph: &StructureGraph,
    forest: &SpanningForest,
    deadline: &Deadline,
) -> Result<Vec<Cycle>, EngineError> {
    let mut cycles = Vec::with_capacity(forest.non_tree_edges().len());

    for &edge in forest.non_tree_edges() {
        deadline.check()?;

        let interaction = graph
            .interaction(edge)
            .ok_or_else(|| EngineError::Internal(format!("non-tree edge {:?} missing", edge)))?;
        let (u, v) = interaction.endpoints();
        let path = forest.tree_path(v, u).ok_or_else(|| {
            EngineError::Forest(format!("no tree path closes non-tree edge {:?}", edge))
        })?;

        let mut walk = path.interactions;
        walk.push(edge);
        let cycle = Cycle::from_walk(graph, v, walk)
            .map_err(|e| EngineError::Internal(format!("fundamental cycle is malformed: {}", e)))?;
        cycles.push(cycle);
    }

    debug!(count = cycles.len(), "Generated fundamental cycles");
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use crate::core::models::interaction::{BasePairFamily, Interaction, InteractionKind};
    use crate::core::models::residue::{Residue, ResidueKey};
    use std::time::Duration;

    fn graph_from_edges(n: isize, edges: &[(usize, usize)]) -> (StructureGraph, Vec<ResidueId>) {
        let mut graph = StructureGraph::new();
        let ids: Vec<_> = (1..=n)
            .map(|i| {
                graph
                    .add_residue(Residue::new(ResidueKey::new('A', i), "C"))
                    .unwrap()
            })
            .collect();
        for &(a, b) in edges {
            graph
                .add_interaction(Interaction::new(ids[a], ids[b], InteractionKind::Stacking))
                .unwrap();
        }
        (graph, ids)
    }

    fn fundamental_cycles(graph: &StructureGraph) -> Vec<Cycle> {
        let forest = SpanningForest::build(graph).unwrap();
        generate(graph, &forest, &Deadline::unbounded()).unwrap()
    }

    #[test]
    fn square_yields_single_four_cycle() {
        let (graph, _) = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let cycles = fundamental_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 4);
        assert_eq!(cycles[0].weight(), 4.0);
        assert!(cycles[0].validate(&graph).is_ok());
    }

    #[test]
    fn one_cycle_per_non_tree_edge_each_containing_it() {
        let (graph, _) = graph_from_edges(
            5,
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2), (1, 3)],
        );
        let forest = SpanningForest::build(&graph).unwrap();
        let cycles = generate(&graph, &forest, &Deadline::unbounded()).unwrap();

        assert_eq!(cycles.len(), graph.cycle_space_dimension());
        for (cycle, &edge) in cycles.iter().zip(forest.non_tree_edges()) {
            assert!(cycle.validate(&graph).is_ok());
            assert_eq!(cycle.interactions().last(), Some(&edge));
            let non_tree_in_cycle = cycle
                .interactions()
                .iter()
                .filter(|e| !forest.is_tree_edge(**e))
                .count();
            assert_eq!(non_tree_in_cycle, 1);
        }
    }

    #[test]
    fn tree_has_no_fundamental_cycles() {
        let (graph, _) = graph_from_edges(2, &[(0, 1)]);
        assert!(fundamental_cycles(&graph).is_empty());
    }

    #[test]
    fn parallel_edges_give_a_two_cycle() {
        let (mut graph, ids) = graph_from_edges(2, &[(0, 1)]);
        graph
            .add_interaction(Interaction::new(
                ids[0],
                ids[1],
                InteractionKind::BasePair(BasePairFamily::CisWatsonWatson),
            ))
            .unwrap();
        let cycles = fundamental_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_degenerate());
    }

    #[test]
    fn expired_deadline_aborts_generation() {
        let (graph, _) = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let forest = SpanningForest::build(&graph).unwrap();
        let result = generate(&graph, &forest, &Deadline::after(Some(Duration::ZERO)));
        assert!(matches!(result, Err(EngineError::DeadlineExceeded { .. })));
    }
}
