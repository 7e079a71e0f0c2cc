use crate::config::models::InputOptions;
use crate::error::{CliError, Result};
use anyhow::{Context, anyhow};
use rnacycle::core::models::builder::GraphBuilder;
use rnacycle::core::models::graph::StructureGraph;
use rnacycle::core::models::interaction::InteractionKind;
use rnacycle::core::models::residue::ResidueKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One row of an interaction table.
#[derive(Debug, Deserialize)]
struct InteractionRecord {
    chain1: String,
    position1: String,
    residue1: String,
    chain2: String,
    position2: String,
    residue2: String,
    kind: String,
    weight: Option<f64>,
}

fn residue_key(chain: &str, position: &str) -> anyhow::Result<ResidueKey> {
    Ok(format!("{}:{}", chain.trim(), position.trim()).parse::<ResidueKey>()?)
}

/// Reads an interaction table and builds the graph it describes.
///
/// Residues are registered the first time they appear. A residue that shows up again under
/// a different name is rejected, as is any row the graph itself refuses.
pub fn read_interaction_table<R: Read>(
    reader: R,
    options: &InputOptions,
) -> anyhow::Result<StructureGraph> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = GraphBuilder::new().with_backbone(options.add_backbone);
    let mut names: HashMap<ResidueKey, String> = HashMap::new();

    for (index, record) in csv_reader.deserialize::<InteractionRecord>().enumerate() {
        // Row 1 is the header.
        let row = index + 2;
        let record = record.with_context(|| format!("Malformed record at row {}", row))?;

        let mut register = |chain: &str, position: &str, name: &str| -> anyhow::Result<ResidueKey> {
            let key = residue_key(chain, position).with_context(|| format!("Row {}", row))?;
            match names.get(&key) {
                Some(known) if known != name => Err(anyhow!(
                    "Row {}: residue {} is named '{}' but was first seen as '{}'",
                    row,
                    key,
                    name,
                    known
                )),
                Some(_) => Ok(key),
                None => {
                    names.insert(key, name.to_string());
                    builder.add_residue(key, name);
                    Ok(key)
                }
            }
        };

        let a = register(&record.chain1, &record.position1, &record.residue1)?;
        let b = register(&record.chain2, &record.position2, &record.residue2)?;

        let kind: InteractionKind = record
            .kind
            .parse()
            .with_context(|| format!("Row {}", row))?;
        let weight = record.weight.unwrap_or(options.default_weight);
        builder.add_interaction(a, b, kind, Some(weight));
    }

    debug!(
        residues = builder.residue_count(),
        interactions = builder.interaction_count(),
        "Interaction table read."
    );
    Ok(builder.build()?)
}

pub fn read_interaction_file(path: &Path, options: &InputOptions) -> Result<StructureGraph> {
    let file = std::fs::File::open(path)?;
    read_interaction_table(file, options).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e,
    })
}
