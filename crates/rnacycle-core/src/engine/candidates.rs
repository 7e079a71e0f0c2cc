use super::deadline::Deadline;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::cycles::cycle::Cycle;
use crate::core::cycles::vector::CycleVector;
use crate::core::models::graph::StructureGraph;
use crate::core::models::ids::{InteractionId, ResidueId};
use crate::core::models::residue::ResidueKey;
use slotmap::SecondaryMap;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct State {
    distance: f64,
    hops: usize,
    sequence: usize,
    residue: ResidueId,
}

// Reversed so that `BinaryHeap` pops the closest state first; ties go to fewer hops, then
// to the state pushed first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Dijkstra shortest-path tree rooted at one residue.
///
/// Equal-distance paths are resolved by hop count and then by discovery order, which follows
/// the graph's adjacency order, so the tree is reproducible for a fixed graph.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    distances: SecondaryMap<ResidueId, f64>,
    hops: SecondaryMap<ResidueId, usize>,
    links: SecondaryMap<ResidueId, (ResidueId, InteractionId)>,
    branches: SecondaryMap<ResidueId, ResidueId>,
}

impl ShortestPathTree {
    /// Grows the tree from `root`, never using `excluded` if given.
    pub fn grow(graph: &StructureGraph, root: ResidueId, excluded: Option<InteractionId>) -> Self {
        let mut tree = Self {
            distances: SecondaryMap::new(),
            hops: SecondaryMap::new(),
            links: SecondaryMap::new(),
            branches: SecondaryMap::new(),
        };
        if !graph.contains_residue(root) {
            return tree;
        }

        let mut settled: SecondaryMap<ResidueId, ()> = SecondaryMap::new();
        let mut heap = BinaryHeap::new();
        let mut sequence = 0;
        tree.distances.insert(root, 0.0);
        tree.hops.insert(root, 0);
        heap.push(State {
            distance: 0.0,
            hops: 0,
            sequence,
            residue: root,
        });

        while let Some(State {
            distance,
            hops,
            residue,
            ..
        }) = heap.pop()
        {
            if settled.insert(residue, ()).is_some() {
                continue;
            }
            if let Some(&(parent, _)) = tree.links.get(residue) {
                let branch = if parent == root {
                    residue
                } else {
                    tree.branches.get(parent).copied().unwrap_or(residue)
                };
                tree.branches.insert(residue, branch);
            }

            for (edge, next) in graph.neighbors(residue) {
                if Some(edge) == excluded || settled.contains_key(next) {
                    continue;
                }
                let Some(interaction) = graph.interaction(edge) else {
                    continue;
                };
                let candidate = distance + interaction.weight;
                let improves = match (tree.distances.get(next), tree.hops.get(next)) {
                    (Some(&known), Some(&known_hops)) => {
                        candidate < known || (candidate == known && hops + 1 < known_hops)
                    }
                    _ => true,
                };
                if improves {
                    tree.distances.insert(next, candidate);
                    tree.hops.insert(next, hops + 1);
                    tree.links.insert(next, (residue, edge));
                    sequence += 1;
                    heap.push(State {
                        distance: candidate,
                        hops: hops + 1,
                        sequence,
                        residue: next,
                    });
                }
            }
        }
        tree
    }

    pub fn reaches(&self, residue: ResidueId) -> bool {
        self.distances.contains_key(residue)
    }

    #[cfg(test)]
    pub fn distance(&self, residue: ResidueId) -> Option<f64> {
        self.distances.get(residue).copied()
    }

    pub fn hops(&self, residue: ResidueId) -> Option<usize> {
        self.hops.get(residue).copied()
    }

    pub fn parent_edge(&self, residue: ResidueId) -> Option<InteractionId> {
        self.links.get(residue).map(|&(_, edge)| edge)
    }

    /// The child of the root whose subtree contains `residue`.
    pub fn branch(&self, residue: ResidueId) -> Option<ResidueId> {
        self.branches.get(residue).copied()
    }

    /// Interactions along the tree path from the root to `target`.
    pub fn path_edges(&self, target: ResidueId) -> Option<Vec<InteractionId>> {
        if !self.reaches(target) {
            return None;
        }
        let mut edges = Vec::new();
        let mut current = target;
        while let Some(&(parent, edge)) = self.links.get(current) {
            edges.push(edge);
            current = parent;
        }
        edges.reverse();
        Some(edges)
    }
}

/// A candidate cycle with everything the minimizer sorts and reduces on.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub cycle: Cycle,
    pub vector: CycleVector,
    pub keys: Vec<ResidueKey>,
}

impl Candidate {
    fn new(graph: &StructureGraph, cycle: Cycle) -> Result<Self, EngineError> {
        let vector = CycleVector::from_cycle(graph, &cycle).ok_or_else(|| {
            EngineError::Internal("candidate cycle references an unknown interaction".to_string())
        })?;
        let keys = cycle.sorted_keys(graph);
        Ok(Self {
            cycle,
            vector,
            keys,
        })
    }

    /// Ascending weight, then fewer interactions, then the sorted residue keys.
    pub fn order(&self, other: &Self) -> Ordering {
        self.cycle
            .weight()
            .total_cmp(&other.cycle.weight())
            .then_with(|| self.cycle.len().cmp(&other.cycle.len()))
            .then_with(|| self.keys.cmp(&other.keys))
    }
}

/// Collects candidate cycles, keeping the first cycle seen for each edge set.
#[derive(Debug)]
pub struct CandidatePool<'g> {
    graph: &'g StructureGraph,
    allow_two_cycles: bool,
    seen: HashSet<CycleVector>,
    candidates: Vec<Candidate>,
}

impl<'g> CandidatePool<'g> {
    pub fn new(graph: &'g StructureGraph, allow_two_cycles: bool) -> Self {
        Self {
            graph,
            allow_two_cycles,
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Adds `cycle` unless it is a forbidden two-cycle or duplicates an earlier edge set.
    pub fn offer(&mut self, cycle: Cycle) -> Result<bool, EngineError> {
        if cycle.is_degenerate() && !self.allow_two_cycles {
            return Ok(false);
        }
        let candidate = Candidate::new(self.graph, cycle)?;
        if !self.seen.insert(candidate.vector.clone()) {
            return Ok(false);
        }
        self.candidates.push(candidate);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Candidates in minimizer order. The sort is stable, so exact ties keep offer order.
    pub fn into_sorted(self) -> Vec<Candidate> {
        let mut candidates = self.candidates;
        candidates.sort_by(Candidate::order);
        candidates
    }
}

/// Offers the Horton candidates of every root: for each interaction `(u, v)` whose shortest
/// paths from the root leave it through different branches, the cycle
/// `P(root, u) + (u, v) + P(v, root)`.
///
/// `max_len` drops cycles with more interactions; 0 keeps all of them.
pub fn offer_horton_cycles(
    pool: &mut CandidatePool,
    max_len: usize,
    deadline: &Deadline,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    let graph = pool.graph;
    for (root, _) in graph.residues_iter() {
        deadline.check()?;
        let tree = ShortestPathTree::grow(graph, root, None);

        for (edge, interaction) in graph.interactions_iter() {
            let (u, v) = interaction.endpoints();
            let (Some(hops_u), Some(hops_v)) = (tree.hops(u), tree.hops(v)) else {
                continue;
            };
            if tree.parent_edge(u) == Some(edge) || tree.parent_edge(v) == Some(edge) {
                continue;
            }
            if u != root && v != root && tree.branch(u) == tree.branch(v) {
                continue;
            }
            if max_len > 0 && hops_u + hops_v + 1 > max_len {
                continue;
            }

            let (Some(mut walk), Some(back)) = (tree.path_edges(u), tree.path_edges(v)) else {
                continue;
            };
            walk.push(edge);
            walk.extend(back.into_iter().rev());
            let cycle = Cycle::from_walk(graph, root, walk)
                .map_err(|e| EngineError::Internal(format!("Horton cycle is malformed: {}", e)))?;
            pool.offer(cycle)?;
        }
        reporter.report(Progress::TaskIncrement);
    }
    debug!(candidates = pool.len(), "Collected Horton candidates");
    Ok(())
}

/// Offers, for every interaction `e = (u, v)`, the shortest path from `u` to `v` in the graph
/// without `e`, closed by `e`. Bridges have no such cycle and are skipped.
pub fn offer_edge_cycles(
    pool: &mut CandidatePool,
    deadline: &Deadline,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    let graph = pool.graph;
    for (edge, interaction) in graph.interactions_iter() {
        deadline.check()?;
        let (u, v) = interaction.endpoints();
        let tree = ShortestPathTree::grow(graph, u, Some(edge));
        if let Some(mut walk) = tree.path_edges(v) {
            walk.push(edge);
            let cycle = Cycle::from_walk(graph, u, walk).map_err(|e| {
                EngineError::Internal(format!("shortest edge cycle is malformed: {}", e))
            })?;
            pool.offer(cycle)?;
        }
        reporter.report(Progress::TaskIncrement);
    }
    debug!(candidates = pool.len(), "Collected per-edge shortest cycles");
    Ok(())
}
