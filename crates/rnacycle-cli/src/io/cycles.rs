use crate::error::{CliError, Result};
use anyhow::Context;
use rnacycle::core::cycles::basis::CycleBasis;
use rnacycle::core::models::graph::StructureGraph;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CYCLE_TABLE_SUFFIX: &str = ".cycles.csv";

const HEADER: [&str; 7] = [
    "cycle",
    "step",
    "from",
    "to",
    "kind",
    "weight",
    "cycle_weight",
];

/// One edge of one cycle, in walk order.
#[derive(Debug, Serialize)]
struct CycleRow {
    cycle: usize,
    step: usize,
    from: String,
    to: String,
    kind: String,
    weight: f64,
    cycle_weight: f64,
}

/// `<dir>/<stem>.cycles.csv`, where `dir` defaults to the input's own directory.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}{}", stem, CYCLE_TABLE_SUFFIX))
}

pub fn write_cycle_table<W: Write>(
    writer: W,
    graph: &StructureGraph,
    basis: &CycleBasis,
) -> anyhow::Result<()> {
    // Written by hand so that an empty basis still yields a header.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    let key_of = |id| {
        graph
            .residue_key(id)
            .map(|key| key.to_string())
            .context("Cycle references a residue outside the graph")
    };

    for (index, cycle) in basis.iter().enumerate() {
        let steps = cycle.interactions().iter().zip(cycle.residues().windows(2));
        for (step, (&edge, pair)) in steps.enumerate() {
            let interaction = graph
                .interaction(edge)
                .context("Cycle references an interaction outside the graph")?;
            csv_writer.serialize(CycleRow {
                cycle: index + 1,
                step: step + 1,
                from: key_of(pair[0])?,
                to: key_of(pair[1])?,
                kind: interaction.kind.to_string(),
                weight: interaction.weight,
                cycle_weight: cycle.weight(),
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_cycle_file(path: &Path, graph: &StructureGraph, basis: &CycleBasis) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_cycle_table(std::io::BufWriter::new(file), graph, basis)
        .with_context(|| format!("Failed to write cycle table '{}'", path.display()))
        .map_err(CliError::Other)
}
