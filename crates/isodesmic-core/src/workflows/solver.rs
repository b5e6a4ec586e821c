use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("No balanced reaction exists among the accepted candidates")]
    NoSolution,

    #[error("Reaction solver failed: {0}")]
    Failed(String),
}

/// Selects a balanced reaction from a constraint set.
///
/// Given the target vector `t` and the candidate matrix `A` (one row per accepted
/// candidate), a solver returns pairs `(row, coefficient)` such that the weighted
/// sum of the selected rows equals `t`. Coefficients must be nonzero. How the
/// selection is made (minimal reaction, integer programming, enumeration) is up to
/// the implementation.
pub trait ReactionSolver {
    fn solve(
        &self,
        target: &DVector<u32>,
        candidates: &DMatrix<u32>,
    ) -> Result<Vec<(usize, f64)>, SolverError>;
}

impl<F> ReactionSolver for F
where
    F: Fn(&DVector<u32>, &DMatrix<u32>) -> Result<Vec<(usize, f64)>, SolverError>,
{
    fn solve(
        &self,
        target: &DVector<u32>,
        candidates: &DMatrix<u32>,
    ) -> Result<Vec<(usize, f64)>, SolverError> {
        self(target, candidates)
    }
}
