use super::graph::{GraphError, StructureGraph};
use super::interaction::{DEFAULT_WEIGHT, Interaction, InteractionKind};
use super::residue::{Residue, ResidueKey};
use itertools::Itertools;
use tracing::debug;

struct PendingInteraction {
    a: ResidueKey,
    b: ResidueKey,
    kind: InteractionKind,
    weight: Option<f64>,
}

/// Assembles a [`StructureGraph`] from records keyed by [`ResidueKey`].
///
/// Records are only buffered until [`GraphBuilder::build`], which either returns the complete
/// graph or the first construction error. A partially built graph never escapes.
#[derive(Default)]
pub struct GraphBuilder {
    residues: Vec<Residue>,
    interactions: Vec<PendingInteraction>,
    synthesize_backbone: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a phosphodiester bond between sequence neighbours of the same chain whenever the
    /// input does not already provide one.
    pub fn with_backbone(mut self, enabled: bool) -> Self {
        self.synthesize_backbone = enabled;
        self
    }

    pub fn add_residue(&mut self, key: ResidueKey, name: &str) -> &mut Self {
        self.residues.push(Residue::new(key, name));
        self
    }

    pub fn add_interaction(
        &mut self,
        a: ResidueKey,
        b: ResidueKey,
        kind: InteractionKind,
        weight: Option<f64>,
    ) -> &mut Self {
        self.interactions.push(PendingInteraction { a, b, kind, weight });
        self
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    pub fn build(self) -> Result<StructureGraph, GraphError> {
        let mut graph = StructureGraph::new();

        for residue in self.residues {
            graph.add_residue(residue)?;
        }

        for pending in self.interactions {
            let a = graph
                .find_residue(&pending.a)
                .ok_or_else(|| GraphError::UnknownVertex(pending.a.to_string()))?;
            let b = graph
                .find_residue(&pending.b)
                .ok_or_else(|| GraphError::UnknownVertex(pending.b.to_string()))?;
            let interaction = Interaction::new(a, b, pending.kind)
                .with_weight(pending.weight.unwrap_or(DEFAULT_WEIGHT));
            graph.add_interaction(interaction)?;
        }

        if self.synthesize_backbone {
            let added = add_missing_backbone(&mut graph)?;
            debug!(added, "Synthesized missing phosphodiester bonds");
        }

        Ok(graph)
    }
}

/// Links consecutive residues of each chain whose positions differ by at most one.
///
/// Insertion codes share the position of their parent residue, so `A:10`, `A:10a` and `A:11`
/// form one continuous strand. A gap in numbering is treated as a chain break.
fn add_missing_backbone(graph: &mut StructureGraph) -> Result<usize, GraphError> {
    let ordered: Vec<(ResidueKey, _)> = graph
        .residues_iter()
        .map(|(id, residue)| (residue.key, id))
        .sorted_by_key(|(key, _)| *key)
        .collect();

    let mut added = 0;
    for ((key_a, id_a), (key_b, id_b)) in ordered.into_iter().tuple_windows() {
        if key_a.chain != key_b.chain || key_b.position.abs_diff(key_a.position) > 1 {
            continue;
        }
        if graph.has_interaction(id_a, id_b, &InteractionKind::PhosphodiesterBond) {
            continue;
        }
        graph.add_interaction(Interaction::new(
            id_a,
            id_b,
            InteractionKind::PhosphodiesterBond,
        ))?;
        added += 1;
    }
    Ok(added)
}
