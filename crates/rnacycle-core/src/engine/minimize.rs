use super::candidates::{self, CandidatePool};
use super::config::BasisConfig;
use super::deadline::Deadline;
use super::error::{BasisError, EngineError};
use super::forest::SpanningForest;
use super::fundamental;
use super::independence::{Gf2Eliminator, Independence};
use super::progress::{Progress, ProgressReporter};
use crate::core::cycles::cycle::Cycle;
use crate::core::models::graph::StructureGraph;
use tracing::{debug, info};

/// Selects a minimum-weight cycle basis by greedy elimination over a sorted candidate pool.
///
/// The pool holds the Horton candidates, the per-edge shortest cycles and, last, the
/// fundamental cycles of `forest`, deduplicated by edge set. Candidates are taken in
/// ascending order and kept whenever they raise the GF(2) rank, until the rank reaches the
/// cycle-space dimension.
///
/// # Errors
///
/// [`BasisError::IncompleteBasis`] if the pool runs out first. With two-cycles allowed this
/// cannot happen on a consistent graph, because the fundamental cycles alone span.
pub fn minimum_basis(
    graph: &StructureGraph,
    forest: &SpanningForest,
    config: &BasisConfig,
    deadline: &Deadline,
    reporter: &ProgressReporter,
) -> Result<Vec<Cycle>, EngineError> {
    let dimension = graph.cycle_space_dimension();
    if dimension == 0 {
        return Ok(Vec::new());
    }

    reporter.report(Progress::TaskStart {
        total_steps: (graph.residue_count() + graph.interaction_count()) as u64,
    });
    let mut pool = CandidatePool::new(graph, config.allow_two_cycles);
    candidates::offer_horton_cycles(&mut pool, config.max_candidate_depth, deadline, reporter)?;
    candidates::offer_edge_cycles(&mut pool, deadline, reporter)?;
    for cycle in fundamental::generate(graph, forest, deadline)? {
        pool.offer(cycle)?;
    }
    reporter.report(Progress::TaskFinish);

    let sorted = pool.into_sorted();
    info!(
        candidates = sorted.len(),
        dimension, "Selecting minimum basis from candidate pool"
    );

    let mut eliminator = Gf2Eliminator::new(graph.interaction_count());
    let mut basis = Vec::with_capacity(dimension);
    for candidate in sorted {
        deadline.check()?;
        if eliminator.try_add(candidate.vector) == Independence::Accepted {
            basis.push(candidate.cycle);
            if eliminator.rank() == dimension {
                break;
            }
        }
    }

    if eliminator.rank() < dimension {
        return Err(BasisError::IncompleteBasis {
            rank: eliminator.rank(),
            dimension,
        }
        .into());
    }
    debug!(
        rank = eliminator.rank(),
        weight = basis.iter().map(Cycle::weight).sum::<f64>(),
        "Minimum basis complete"
    );
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use crate::core::models::interaction::{BasePairFamily, Interaction, InteractionKind};
    use crate::core::models::residue::{Residue, ResidueKey};
    use std::time::Duration;

    fn weighted_graph(n: isize, edges: &[(usize, usize, f64)]) -> (StructureGraph, Vec<ResidueId>) {
        let mut graph = StructureGraph::new();
        let ids: Vec<_> = (1..=n)
            .map(|i| {
                graph
                    .add_residue(Residue::new(ResidueKey::new('A', i), "G"))
                    .unwrap()
            })
            .collect();
        for &(a, b, w) in edges {
            graph
                .add_interaction(
                    Interaction::new(ids[a], ids[b], InteractionKind::Stacking).with_weight(w),
                )
                .unwrap();
        }
        (graph, ids)
    }

    fn minimum(graph: &StructureGraph, config: &BasisConfig) -> Result<Vec<Cycle>, EngineError> {
        let forest = SpanningForest::build(graph).unwrap();
        minimum_basis(
            graph,
            &forest,
            config,
            &Deadline::after(config.timeout),
            &ProgressReporter::new(),
        )
    }

    #[test]
    fn chorded_square_selects_both_triangles() {
        let (graph, _) = weighted_graph(
            4,
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 1.0)],
        );
        let basis = minimum(&graph, &BasisConfig::default()).unwrap();
        assert_eq!(basis.len(), 2);
        assert!(basis.iter().all(|c| c.len() == 3 && c.weight() == 3.0));
    }

    #[test]
    fn weighted_graph_avoids_heavy_chord() {
        // Hexagon with a heavy chord between opposite corners. The fundamental basis from
        // the BFS tree uses the chord; the minimum basis pairs the hexagon with one half.
        let (graph, _) = weighted_graph(
            6,
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
                (5, 0, 1.0),
                (0, 3, 10.0),
            ],
        );
        let basis = minimum(&graph, &BasisConfig::default()).unwrap();
        let total: f64 = basis.iter().map(Cycle::weight).sum();
        assert_eq!(basis.len(), 2);
        assert_eq!(total, 6.0 + 13.0);

        let forest = SpanningForest::build(&graph).unwrap();
        let fundamental_total: f64 = fundamental::generate(&graph, &forest, &Deadline::unbounded())
            .unwrap()
            .iter()
            .map(Cycle::weight)
            .sum();
        assert!(total <= fundamental_total);
    }

    #[test]
    fn forest_only_graph_has_empty_basis() {
        let (graph, _) = weighted_graph(2, &[(0, 1, 1.0)]);
        assert!(minimum(&graph, &BasisConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn forbidding_two_cycles_fails_when_they_are_required() {
        let (mut graph, ids) = weighted_graph(2, &[(0, 1, 1.0)]);
        graph
            .add_interaction(Interaction::new(
                ids[0],
                ids[1],
                InteractionKind::BasePair(BasePairFamily::CisWatsonWatson),
            ))
            .unwrap();

        let allowed = minimum(&graph, &BasisConfig::default()).unwrap();
        assert_eq!(allowed.len(), 1);
        assert!(allowed[0].is_degenerate());

        let config = BasisConfig {
            allow_two_cycles: false,
            ..BasisConfig::default()
        };
        assert!(matches!(
            minimum(&graph, &config),
            Err(EngineError::Basis {
                source: BasisError::IncompleteBasis {
                    rank: 0,
                    dimension: 1
                }
            })
        ));
    }

    #[test]
    fn zero_timeout_aborts() {
        let (graph, _) = weighted_graph(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let config = BasisConfig {
            timeout: Some(Duration::ZERO),
            ..BasisConfig::default()
        };
        assert!(matches!(
            minimum(&graph, &config),
            Err(EngineError::DeadlineExceeded { .. })
        ));
    }
}
