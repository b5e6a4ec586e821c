use super::config::EstimateConfig;
use super::progress::{Progress, ProgressReporter};
use super::solver::{ReactionSolver, SolverError};
use crate::core::features::constraints::{ConstraintSet, ConstraintSpace};
use crate::core::reaction::{Reaction, ReactionError};
use crate::core::species::Species;
use crate::core::thermo::quantity::Enthalpy;
use crate::reference::database::ReferenceDatabase;
use crate::reference::error::ReferenceError;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(
        "Target '{target}' was computed at '{target_level}' but the estimate is configured for '{configured_level}'"
    )]
    LevelOfTheoryMismatch {
        target: String,
        target_level: String,
        configured_level: String,
    },

    #[error("Reaction solver failed for target '{target}': {source}")]
    Solver { target: String, source: SolverError },

    #[error("Solver selected candidate {index} but only {available} candidates were accepted")]
    CandidateIndexOutOfRange { index: usize, available: usize },

    #[error("Invalid reaction: {0}")]
    Reaction(#[from] ReactionError),

    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceError),
}

/// The outcome of estimating one target.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub reaction: Reaction,
    /// Estimated high-level enthalpy of formation of the target.
    pub enthalpy: Enthalpy,
    /// The constraint set the solver worked on.
    pub constraints: ConstraintSet,
}

/// Estimates the high-level enthalpy of one target from a pool of references.
///
/// The target itself is removed from the pool before the constraint set is built,
/// so a target that also appears as a reference is never its own companion.
///
/// # Errors
///
/// Returns `WorkflowError` if the target's level of theory differs from the
/// configured one, the solver fails or selects a row that does not exist, or the
/// selected reaction is invalid or lacks reference data.
#[instrument(skip_all, name = "estimate_workflow", fields(target = %target))]
pub fn run<S>(
    target: &Arc<Species>,
    references: &[Arc<Species>],
    solver: &S,
    config: &EstimateConfig,
    reporter: &ProgressReporter,
) -> Result<Estimate, WorkflowError>
where
    S: ReactionSolver + ?Sized,
{
    if target.level_of_theory() != config.level_of_theory {
        return Err(WorkflowError::LevelOfTheoryMismatch {
            target: target.to_string(),
            target_level: target.level_of_theory().to_string(),
            configured_level: config.level_of_theory.clone(),
        });
    }

    let candidates: Vec<Arc<Species>> = references
        .iter()
        .filter(|r| !Arc::ptr_eq(r, target))
        .cloned()
        .collect();

    let space = ConstraintSpace::new(Arc::clone(target), config.rules);
    let constraints = space.compute(&candidates);

    let selection = solver
        .solve(&constraints.target_vector, &constraints.candidate_matrix)
        .map_err(|source| WorkflowError::Solver {
            target: target.to_string(),
            source,
        })?;

    let companions = selection
        .into_iter()
        .map(|(index, coefficient)| {
            constraints
                .accepted
                .get(index)
                .map(|species| (Arc::clone(species), coefficient))
                .ok_or(WorkflowError::CandidateIndexOutOfRange {
                    index,
                    available: constraints.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let reaction = Reaction::new(Arc::clone(target), companions)?;
    let residual = reaction.balance_residual(config.rules);
    if !residual.is_empty() {
        let unbalanced: Vec<String> = residual.iter().map(|(label, _)| label.to_string()).collect();
        warn!(
            reaction = %reaction,
            unbalanced = ?unbalanced,
            "Selected reaction does not conserve every constrained feature."
        );
    }
    let enthalpy = reaction.estimated_high_level_enthalpy()?;

    debug!(reaction = %reaction, "Evaluated error-canceling reaction.");
    info!(enthalpy = %enthalpy, "Target estimate complete.");
    reporter.report(Progress::TargetFinish {
        label: target.to_string(),
        accepted_candidates: constraints.len(),
    });

    Ok(Estimate {
        reaction,
        enthalpy,
        constraints,
    })
}

/// Like [`run`], drawing references from a database at the configured level of theory.
pub fn run_with_database<S>(
    target: &Arc<Species>,
    database: &ReferenceDatabase,
    solver: &S,
    config: &EstimateConfig,
    reporter: &ProgressReporter,
) -> Result<Estimate, WorkflowError>
where
    S: ReactionSolver + ?Sized,
{
    let references =
        database.extract_level_of_theory(&config.level_of_theory, config.reference_sets.as_deref())?;
    run(target, &references, solver, config, reporter)
}

/// Estimates several independent targets against the same reference pool.
///
/// Targets are processed in parallel when the `parallel` feature is enabled.
/// Results are returned in the order of `targets`; one failing target does not
/// stop the others.
#[instrument(skip_all, name = "estimate_batch", fields(targets = targets.len()))]
pub fn run_batch<S>(
    targets: &[Arc<Species>],
    references: &[Arc<Species>],
    solver: &S,
    config: &EstimateConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<Estimate, WorkflowError>>
where
    S: ReactionSolver + Sync + ?Sized,
{
    reporter.report(Progress::BatchStart {
        total_targets: targets.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = targets.iter();

    #[cfg(feature = "parallel")]
    let iterator = targets.par_iter();

    let results: Vec<_> = iterator
        .map(|target| {
            let result = run(target, references, solver, config, reporter);
            if let Err(e) = &result {
                reporter.report(Progress::Message(format!("{}: {}", target, e)));
            }
            result
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        succeeded = results.len() - failed,
        failed, "Batch estimate finished."
    );
    reporter.report(Progress::BatchFinish);
    results
}
