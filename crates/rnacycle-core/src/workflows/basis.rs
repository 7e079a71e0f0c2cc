use crate::core::cycles::basis::{BasisMode, CycleBasis};
use crate::core::models::graph::StructureGraph;
use crate::engine::config::BasisConfig;
use crate::engine::deadline::Deadline;
use crate::engine::error::EngineError;
use crate::engine::forest::SpanningForest;
use crate::engine::fundamental;
use crate::engine::minimize;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::verify::verify_basis;
use tracing::{info, instrument, warn};

/// Computes the cycle basis of `graph` selected by `config.mode`.
///
/// The deadline in `config.timeout` covers the whole call. With `config.verify` set, the
/// result is checked before it is returned and a failed check is reported as an error.
#[instrument(skip_all, name = "basis_workflow")]
pub fn run(
    graph: &StructureGraph,
    config: &BasisConfig,
    reporter: &ProgressReporter,
) -> Result<CycleBasis, EngineError> {
    let deadline = Deadline::after(config.timeout);
    let dimension = graph.cycle_space_dimension();
    info!(
        residues = graph.residue_count(),
        interactions = graph.interaction_count(),
        dimension,
        mode = %config.mode,
        "Starting cycle basis computation."
    );

    reporter.report(Progress::PhaseStart {
        name: "Spanning Forest",
    });
    let forest = SpanningForest::build(graph)?;
    reporter.report(Progress::PhaseFinish);

    let cycles = match config.mode {
        BasisMode::Fundamental => {
            reporter.report(Progress::PhaseStart {
                name: "Fundamental Cycles",
            });
            fundamental::generate(graph, &forest, &deadline)?
        }
        BasisMode::Minimum => {
            reporter.report(Progress::PhaseStart {
                name: "Minimum Basis",
            });
            minimize::minimum_basis(graph, &forest, config, &deadline, reporter)?
        }
    };
    reporter.report(Progress::PhaseFinish);

    let basis = CycleBasis::new(cycles, config.mode);

    if config.verify {
        reporter.report(Progress::PhaseStart {
            name: "Verification",
        });
        deadline.check()?;
        if let Err(e) = verify_basis(graph, &basis, config.allow_two_cycles) {
            warn!(error = %e, "Cycle basis failed verification.");
            return Err(e.into());
        }
        reporter.report(Progress::PhaseFinish);
    }

    info!(
        cycles = basis.len(),
        total_weight = basis.total_weight(),
        elapsed_ms = deadline.elapsed().as_millis() as u64,
        "Cycle basis computation finished."
    );
    Ok(basis)
}

/// Fundamental basis with default settings otherwise.
pub fn fundamental(graph: &StructureGraph) -> Result<CycleBasis, EngineError> {
    let config = BasisConfig {
        mode: BasisMode::Fundamental,
        ..BasisConfig::default()
    };
    run(graph, &config, &ProgressReporter::new())
}

/// Minimum basis with default settings.
pub fn minimum(graph: &StructureGraph) -> Result<CycleBasis, EngineError> {
    run(graph, &BasisConfig::default(), &ProgressReporter::new())
}
