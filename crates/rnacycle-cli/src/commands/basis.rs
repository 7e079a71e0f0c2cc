use crate::cli::BasisArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::io::cycles::{output_path_for, write_cycle_file};
use crate::io::interactions::read_interaction_file;
use crate::utils::discovery::{collect_inputs, structure_id};
use crate::utils::progress::CliProgressHandler;
use rayon::prelude::*;
use rnacycle::engine::progress::ProgressReporter;
use rnacycle::workflows::batch::{self, NamedStructure};
use std::path::PathBuf;
use tracing::{error, info};

pub fn run(args: BasisArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let files = collect_inputs(&config.inputs)?;
    if files.is_empty() {
        return Err(CliError::Argument(
            "No interaction tables (*.csv) found in the given inputs.".to_string(),
        ));
    }
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    info!(count = files.len(), "Loading interaction tables...");
    let loaded: Vec<(PathBuf, Result<NamedStructure>)> = files
        .into_par_iter()
        .map(|path| {
            let structure = read_interaction_file(&path, &config.input)
                .map(|graph| NamedStructure::new(structure_id(&path), graph));
            (path, structure)
        })
        .collect();

    let total = loaded.len();
    let mut failures = 0;
    let mut paths = Vec::with_capacity(total);
    let mut structures = Vec::with_capacity(total);
    for (path, structure) in loaded {
        match structure {
            Ok(structure) => {
                paths.push(path);
                structures.push(structure);
            }
            Err(e) => {
                failures += 1;
                error!(path = %path.display(), error = %e, "Failed to load interaction table.");
                eprintln!("✗ {}: {}", path.display(), e);
            }
        }
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Computing {} cycle bases for {} structure(s)...",
        config.core_config.mode,
        structures.len()
    );
    let outcomes = batch::run(&structures, &config.core_config, &reporter);

    for ((path, structure), outcome) in paths.iter().zip(&structures).zip(outcomes) {
        let written = outcome.result.map_err(CliError::from).and_then(|basis| {
            let output_path = output_path_for(path, config.output_dir.as_deref());
            write_cycle_file(&output_path, &structure.graph, &basis)?;
            Ok((basis, output_path))
        });
        match written {
            Ok((basis, output_path)) => {
                info!(
                    structure = %outcome.id,
                    cycles = basis.len(),
                    total_weight = basis.total_weight(),
                    "Cycle basis written to {:?}", output_path
                );
                println!(
                    "✓ {}: {} cycle(s), total weight {:.3} -> {}",
                    outcome.id,
                    basis.len(),
                    basis.total_weight(),
                    output_path.display()
                );
            }
            Err(e) => {
                failures += 1;
                error!(structure = %outcome.id, error = %e, "Structure failed.");
                eprintln!("✗ {}: {}", outcome.id, e);
            }
        }
    }

    if failures == total {
        return Err(CliError::Other(anyhow::anyhow!(
            "All {} structure(s) failed",
            total
        )));
    }
    if failures > 0 {
        println!("{} of {} structure(s) failed.", failures, total);
    }
    Ok(())
}
