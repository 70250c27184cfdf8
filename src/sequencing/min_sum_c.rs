//! Minimum total completion time subject to deadlines.
//!
//! # Algorithm
//!
//! Backward construction with time budget `τ`, initially the sum of all
//! processing times (the completion time of whatever job runs last):
//!
//! 1. Candidates = unplaced jobs with deadline `≥ τ`.
//! 2. Place the candidate with the longest processing time last
//!    (first in input order on ties).
//! 3. `τ -= p`, repeat until every job is placed.
//!
//! An empty candidate set while jobs remain means no sequence meets all
//! deadlines; this is reported as [`SequencingError::Infeasible`].
//!
//! # Reference
//! Smith (1956), "Various Optimizers for Single-Stage Production"

use tracing::{debug, trace};

use super::{ids_of, Sequencer};
use crate::config::SequencingConfig;
use crate::error::{SequencingError, SequencingResult};
use crate::models::{Attribute, JobSet, SequenceResult, StepAction, TraceRecorder};

const REQUIRED: [Attribute; 2] = [Attribute::ProcessingTime, Attribute::Deadline];

/// Backward deadline-constrained solver. The objective is `ΣC_j`.
#[derive(Debug, Clone, Copy)]
pub struct MinSumCompletion {
    record_trace: bool,
}

impl MinSumCompletion {
    /// Creates a solver with tracing enabled.
    pub fn new() -> Self {
        Self { record_trace: true }
    }

    /// Creates a solver from shared options.
    pub fn from_config(config: &SequencingConfig) -> Self {
        Self {
            record_trace: config.record_trace,
        }
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Builds the sequence backward.
    pub fn solve(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        jobs.require(&REQUIRED)?;

        let mut tau = jobs.total_processing_time();
        let mut unplaced: Vec<usize> = (0..jobs.len()).collect();
        let mut reversed = Vec::with_capacity(jobs.len());
        let mut rec = TraceRecorder::new(self.record_trace);

        while !unplaced.is_empty() {
            let candidates: Vec<usize> = unplaced
                .iter()
                .copied()
                .filter(|&i| jobs.job(i).deadline.is_some_and(|d| d >= tau))
                .collect();

            let Some(chosen) = candidates
                .iter()
                .copied()
                .reduce(|best, i| if jobs.job(i).p() > jobs.job(best).p() { i } else { best })
            else {
                debug!(tau, unplaced = unplaced.len(), "no job fits the remaining budget");
                return Err(SequencingError::Infeasible {
                    tau,
                    unplaced: ids_of(jobs, &unplaced),
                });
            };

            let job = jobs.job(chosen);
            trace!(job = %job.id, tau, candidates = candidates.len(), "placed last");
            rec.record(&job.id, || StepAction::BudgetSelected {
                tau,
                candidates: ids_of(jobs, &candidates),
            });

            tau -= job.p();
            unplaced.retain(|&i| i != chosen);
            reversed.push(chosen);
        }

        reversed.reverse();

        // ΣC_j may exceed i64 even when Σp_j fits
        let mut now = 0;
        let mut total_completion = 0.0;
        for &i in &reversed {
            now += jobs.job(i).p();
            total_completion += now as f64;
        }

        debug!(jobs = jobs.len(), total_completion, "MinSumC sequence computed");

        Ok(SequenceResult::new(self.name(), ids_of(jobs, &reversed))
            .with_objective(total_completion)
            .with_trace(rec.finish()))
    }
}

impl Default for MinSumCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer for MinSumCompletion {
    fn name(&self) -> &'static str {
        "MIN_SUM_C"
    }

    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        self.solve(jobs)
    }

    fn description(&self) -> &'static str {
        "Minimum total completion time with deadlines"
    }
}

/// Runs the deadline-constrained solver with default options.
pub fn solve(jobs: &JobSet) -> SequencingResult<SequenceResult> {
    MinSumCompletion::new().solve(jobs)
}
