//! Bounded restart policy layered on top of [`TileCollapse::solve`]
//!
//! A single solve is not transactional: once a contradiction appears the
//! attempt is lost. The plan here resets the grid, reapplies the hard
//! constraints and tries again until one attempt succeeds or the budget runs
//! out. The solver's random source keeps advancing between attempts.

use crate::algorithm::executor::TileCollapse;
use crate::io::configuration::DEFAULT_MAX_ATTEMPTS;
use crate::io::error::{Result, invalid_parameter};
use serde::{Deserialize, Serialize};

/// Hard constraint applied to one cell before every attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConstraint {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Ids the cell may take
    pub ids: Vec<String>,
}

/// Attempt budget and constraints reapplied on each attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPlan {
    /// Upper bound on full solve attempts
    pub max_attempts: usize,
    /// Ids imposed on the outer ring, if any
    pub boundary: Option<Vec<String>>,
    /// Per-cell constraints, applied before the boundary
    pub seeds: Vec<SeedConstraint>,
}

impl Default for RetryPlan {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            boundary: None,
            seeds: Vec::new(),
        }
    }
}

/// Result of running a [`RetryPlan`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Whether the final attempt produced a complete grid
    pub solved: bool,
    /// Attempts made, including the successful one
    pub attempts: usize,
}

impl RetryPlan {
    /// Plan with a given attempt budget and no constraints
    pub fn with_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Reset the solver and apply seeds, then the boundary
    ///
    /// # Errors
    ///
    /// Returns an error if a seed lies outside the grid or names an
    /// unregistered id
    pub fn apply(&self, solver: &mut TileCollapse) -> Result<()> {
        solver.reset();
        for seed in &self.seeds {
            solver.set(seed.x, seed.y, seed.ids.as_slice())?;
        }
        if let Some(boundary) = &self.boundary {
            solver.ring_constrain(boundary.as_slice())?;
        }
        Ok(())
    }
}

/// Run attempts until one solves or the budget is spent
///
/// # Errors
///
/// Returns an error if the budget is zero or a constraint cannot be applied
pub fn solve_with_retries(solver: &mut TileCollapse, plan: &RetryPlan) -> Result<SolveOutcome> {
    solve_with_retries_observed(solver, plan, |_, _| {})
}

/// [`solve_with_retries`] with a callback after each attempt
///
/// The callback receives the 1-based attempt number and whether it solved.
///
/// # Errors
///
/// Returns an error if the budget is zero or a constraint cannot be applied
pub fn solve_with_retries_observed<F>(
    solver: &mut TileCollapse,
    plan: &RetryPlan,
    mut on_attempt: F,
) -> Result<SolveOutcome>
where
    F: FnMut(usize, bool),
{
    if plan.max_attempts == 0 {
        return Err(invalid_parameter(
            "max_attempts",
            &plan.max_attempts,
            &"at least one attempt is required",
        ));
    }

    for attempt in 1..=plan.max_attempts {
        plan.apply(solver)?;
        let solved = solver.solve()?;
        on_attempt(attempt, solved);
        tracing::debug!(attempt, solved, "retry.attempt");
        if solved {
            return Ok(SolveOutcome {
                solved,
                attempts: attempt,
            });
        }
    }

    Ok(SolveOutcome {
        solved: false,
        attempts: plan.max_attempts,
    })
}
