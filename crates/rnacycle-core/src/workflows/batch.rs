use super::basis;
use crate::core::cycles::basis::CycleBasis;
use crate::core::models::graph::StructureGraph;
use crate::engine::config::BasisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{error, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A graph paired with the identifier it is reported under.
#[derive(Debug, Clone)]
pub struct NamedStructure {
    pub id: String,
    pub graph: StructureGraph,
}

impl NamedStructure {
    pub fn new(id: impl Into<String>, graph: StructureGraph) -> Self {
        Self {
            id: id.into(),
            graph,
        }
    }
}

#[derive(Debug)]
pub struct StructureOutcome {
    pub id: String,
    pub result: Result<CycleBasis, EngineError>,
}

impl StructureOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Computes a basis for every structure, one structure per task.
///
/// Failures stay local to their structure: the returned outcomes are in input order and
/// each carries its own result. Per-structure phases are not forwarded to `reporter`; it
/// receives one `StructureDone` and one `TaskIncrement` per structure.
#[instrument(skip_all, name = "batch_workflow", fields(structures = structures.len()))]
pub fn run(
    structures: &[NamedStructure],
    config: &BasisConfig,
    reporter: &ProgressReporter,
) -> Vec<StructureOutcome> {
    reporter.report(Progress::TaskStart {
        total_steps: structures.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = structures.iter();

    #[cfg(feature = "parallel")]
    let iterator = structures.par_iter();

    let outcomes: Vec<StructureOutcome> = iterator
        .map(|structure| {
            let result = basis::run(&structure.graph, config, &ProgressReporter::new());
            if let Err(e) = &result {
                error!(structure = %structure.id, error = %e, "Cycle basis computation failed.");
            }
            reporter.report(Progress::StructureDone {
                id: structure.id.clone(),
                succeeded: result.is_ok(),
            });
            reporter.report(Progress::TaskIncrement);
            StructureOutcome {
                id: structure.id.clone(),
                result,
            }
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(
        succeeded = outcomes.len() - failed,
        failed, "Batch cycle basis computation finished."
    );
    outcomes
}
