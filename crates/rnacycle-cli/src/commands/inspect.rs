use crate::cli::InspectArgs;
use crate::config::builder::build_input_options;
use crate::error::{CliError, Result};
use crate::io::interactions::read_interaction_file;
use crate::utils::discovery::{collect_inputs, structure_id};
use rnacycle::core::models::graph::StructureGraph;
use tracing::error;

/// Counts reported for one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSummary {
    pub residues: usize,
    pub interactions: usize,
    pub components: usize,
    pub dimension: usize,
}

impl GraphSummary {
    pub fn of(graph: &StructureGraph) -> Self {
        Self {
            residues: graph.residue_count(),
            interactions: graph.interaction_count(),
            components: graph.component_count(),
            dimension: graph.cycle_space_dimension(),
        }
    }
}

pub fn run(args: InspectArgs) -> Result<()> {
    let options = build_input_options(&args.input, None)?;
    let files = collect_inputs(&args.input.input)?;
    if files.is_empty() {
        return Err(CliError::Argument(
            "No interaction tables (*.csv) found in the given inputs.".to_string(),
        ));
    }

    let mut failures = 0;
    for path in &files {
        let id = structure_id(path);
        match read_interaction_file(path, &options) {
            Ok(graph) => {
                let summary = GraphSummary::of(&graph);
                println!(
                    "{}: {} residues, {} interactions, {} component(s), cycle-space dimension {}",
                    id,
                    summary.residues,
                    summary.interactions,
                    summary.components,
                    summary.dimension
                );
            }
            Err(e) => {
                failures += 1;
                error!(structure = %id, error = %e, "Failed to load interaction table.");
                eprintln!("✗ {}: {}", id, e);
            }
        }
    }

    if failures == files.len() {
        return Err(CliError::Other(anyhow::anyhow!(
            "None of the {} table(s) could be read",
            files.len()
        )));
    }
    Ok(())
}
