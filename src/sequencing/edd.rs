//! Earliest Due Date.
//!
//! Sorting by non-decreasing due date minimizes maximum lateness on a
//! single machine, so the whole algorithm is one stable sort.
//!
//! # Reference
//! Jackson (1955), "Scheduling a Production Line to Minimize Maximum Tardiness"

use tracing::debug;

use super::{ids_of, lateness, sorted_positions, Sequencer};
use crate::config::SequencingConfig;
use crate::error::SequencingResult;
use crate::models::{Attribute, JobSet, SequenceResult, StepAction, TraceRecorder};

const REQUIRED: [Attribute; 2] = [Attribute::ProcessingTime, Attribute::DueDate];

/// EDD solver. The objective is `L_max = max_j (C_j - d_j)`.
#[derive(Debug, Clone, Copy)]
pub struct Edd {
    record_trace: bool,
}

impl Edd {
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

    /// Sorts `jobs` by due date; ties keep input order.
    pub fn solve(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        jobs.require(&REQUIRED)?;

        let order = sorted_positions(jobs, |i| jobs.job(i).due_date);
        let mut trace = TraceRecorder::new(self.record_trace);
        let mut now = 0;
        let mut max_lateness = f64::NEG_INFINITY;

        for &i in &order {
            let job = jobs.job(i);
            now += job.p();
            max_lateness = max_lateness.max(lateness(now, job.due_date.unwrap_or(now)));
            trace.record(&job.id, || StepAction::Appended { completion: now });
        }

        debug!(jobs = jobs.len(), max_lateness, "EDD sequence computed");

        Ok(SequenceResult::new(self.name(), ids_of(jobs, &order))
            .with_objective(max_lateness)
            .with_trace(trace.finish()))
    }
}

impl Default for Edd {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        self.solve(jobs)
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Runs EDD with default options.
pub fn solve(jobs: &JobSet) -> SequencingResult<SequenceResult> {
    Edd::new().solve(jobs)
}
