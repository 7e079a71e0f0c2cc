use super::error::BasisError;
use super::independence::{Gf2Eliminator, Independence};
use crate::core::cycles::basis::CycleBasis;
use crate::core::cycles::cycle::Cycle;
use crate::core::cycles::vector::CycleVector;
use crate::core::models::graph::StructureGraph;

/// Checks a single cycle against `graph`.
pub fn validate_cycle(
    graph: &StructureGraph,
    cycle: &Cycle,
    allow_two_cycles: bool,
) -> Result<(), String> {
    cycle.validate(graph).map_err(|e| e.to_string())?;
    if cycle.is_degenerate() && !allow_two_cycles {
        return Err("two-interaction cycles are not permitted".to_string());
    }
    Ok(())
}

/// Confirms that `basis` is a cycle basis of `graph`.
///
/// Every cycle must be a valid closed walk, the basis must have exactly
/// `|E| - |V| + C` cycles, and their incidence vectors must be independent over GF(2).
/// Independent vectors of the right count span the cycle space, so this also proves span.
pub fn verify_basis(
    graph: &StructureGraph,
    basis: &CycleBasis,
    allow_two_cycles: bool,
) -> Result<(), BasisError> {
    for (index, cycle) in basis.iter().enumerate() {
        validate_cycle(graph, cycle, allow_two_cycles)
            .map_err(|reason| BasisError::InvalidCycle { index, reason })?;
    }

    let dimension = graph.cycle_space_dimension();
    if basis.len() != dimension {
        return Err(BasisError::WrongSize {
            found: basis.len(),
            dimension,
        });
    }

    let mut eliminator = Gf2Eliminator::new(graph.interaction_count());
    for (index, cycle) in basis.iter().enumerate() {
        let vector = CycleVector::from_cycle(graph, cycle).ok_or_else(|| {
            BasisError::InvalidCycle {
                index,
                reason: "references an interaction outside the graph".to_string(),
            }
        })?;
        if eliminator.try_add(vector) == Independence::Dependent {
            return Err(BasisError::Dependent { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cycles::basis::BasisMode;
    use crate::core::models::ids::{InteractionId, ResidueId};
    use crate::core::models::interaction::{BasePairFamily, Interaction, InteractionKind};
    use crate::core::models::residue::{Residue, ResidueKey};

    struct Fixture {
        graph: StructureGraph,
        ids: Vec<ResidueId>,
        edges: Vec<InteractionId>,
    }

    // Square 0-1-2-3-0 with chord 0-2: triangles T1 = (e0, e1, e4), T2 = (e2, e3, e4).
    fn chorded_square() -> Fixture {
        let mut graph = StructureGraph::new();
        let ids: Vec<_> = (1..=4)
            .map(|i| {
                graph
                    .add_residue(Residue::new(ResidueKey::new('B', i), "A"))
                    .unwrap()
            })
            .collect();
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]
            .iter()
            .map(|&(a, b)| {
                graph
                    .add_interaction(Interaction::new(ids[a], ids[b], InteractionKind::Stacking))
                    .unwrap()
            })
            .collect();
        Fixture { graph, ids, edges }
    }

    fn walk(f: &Fixture, start: usize, edges: &[usize]) -> Cycle {
        Cycle::from_walk(
            &f.graph,
            f.ids[start],
            edges.iter().map(|&e| f.edges[e]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_basis() {
        let f = chorded_square();
        let basis = CycleBasis::new(
            vec![walk(&f, 0, &[0, 1, 4]), walk(&f, 0, &[3, 2, 4])],
            BasisMode::Minimum,
        );
        assert_eq!(verify_basis(&f.graph, &basis, true), Ok(()));
    }

    #[test]
    fn rejects_wrong_size() {
        let f = chorded_square();
        let basis = CycleBasis::new(vec![walk(&f, 0, &[0, 1, 4])], BasisMode::Minimum);
        assert_eq!(
            verify_basis(&f.graph, &basis, true),
            Err(BasisError::WrongSize {
                found: 1,
                dimension: 2
            })
        );
    }

    #[test]
    fn rejects_dependent_cycles() {
        let f = chorded_square();
        let basis = CycleBasis::new(
            vec![walk(&f, 0, &[0, 1, 4]), walk(&f, 1, &[1, 4, 0])],
            BasisMode::Fundamental,
        );
        assert_eq!(
            verify_basis(&f.graph, &basis, true),
            Err(BasisError::Dependent { index: 1 })
        );
    }

    #[test]
    fn rejects_malformed_cycles() {
        let f = chorded_square();
        // Lists residue 3 where the walk actually reaches residue 2.
        let broken = Cycle::from_parts(
            vec![f.ids[0], f.ids[1], f.ids[3], f.ids[0]],
            vec![f.edges[0], f.edges[1], f.edges[4]],
            3.0,
        );
        let basis = CycleBasis::new(vec![walk(&f, 0, &[0, 1, 4]), broken], BasisMode::Minimum);
        assert!(matches!(
            verify_basis(&f.graph, &basis, true),
            Err(BasisError::InvalidCycle { index: 1, .. })
        ));
    }

    #[test]
    fn two_cycles_respect_the_allow_flag() {
        let mut graph = StructureGraph::new();
        let a = graph
            .add_residue(Residue::new(ResidueKey::new('A', 1), "G"))
            .unwrap();
        let b = graph
            .add_residue(Residue::new(ResidueKey::new('A', 2), "C"))
            .unwrap();
        let backbone = graph
            .add_interaction(Interaction::new(a, b, InteractionKind::PhosphodiesterBond))
            .unwrap();
        let pair = graph
            .add_interaction(Interaction::new(
                a,
                b,
                InteractionKind::BasePair(BasePairFamily::CisWatsonWatson),
            ))
            .unwrap();
        let cycle = Cycle::from_walk(&graph, a, vec![backbone, pair]).unwrap();
        let basis = CycleBasis::new(vec![cycle], BasisMode::Fundamental);

        assert_eq!(verify_basis(&graph, &basis, true), Ok(()));
        assert!(matches!(
            verify_basis(&graph, &basis, false),
            Err(BasisError::InvalidCycle { index: 0, .. })
        ));
    }
}
