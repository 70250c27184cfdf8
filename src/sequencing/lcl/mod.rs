//! Lowest Cost Last (Lawler's algorithm).
//!
//! Builds the sequence from the end. At each step, among unscheduled jobs
//! whose successors are all already placed, the job with the lowest cost
//! `h(remaining, jobs, job)` takes the last open position. For any regular
//! cost this minimizes `max_j h_j` under the precedence constraints.
//!
//! The precedence graph is copied into an owned index arena at call start,
//! so the caller's `JobSet` is never touched.
//!
//! # Complexity
//! O(n²) cost evaluations plus O(n + e) graph bookkeeping.
//!
//! # Reference
//! Lawler (1973), "Optimal Sequencing of a Single Machine Subject to
//! Precedence Constraints"

pub mod cost;

pub use cost::CostFunction;

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{ids_of, Sequencer};
use crate::config::SequencingConfig;
use crate::error::{SequencingError, SequencingResult};
use crate::models::{Attribute, JobSet, SequenceResult, StepAction, TraceRecorder};
use crate::validation;

/// The not-yet-scheduled jobs, as seen by a cost function.
#[derive(Debug, Clone, Copy)]
pub struct RemainingJobs<'a> {
    jobs: &'a JobSet,
    unscheduled: &'a [usize],
    placed: &'a [bool],
    processing_time: i64,
}

impl<'a> RemainingJobs<'a> {
    /// Total processing time of the unscheduled jobs.
    ///
    /// This is the completion time of whichever job is placed next.
    pub fn total_processing_time(&self) -> i64 {
        self.processing_time
    }

    /// Unscheduled job ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        let jobs = self.jobs;
        self.unscheduled.iter().map(move |&i| jobs.job(i).id.as_str())
    }

    /// Whether `job_id` is still unscheduled.
    pub fn contains(&self, job_id: &str) -> bool {
        self.jobs
            .index_of(job_id)
            .is_some_and(|i| !self.placed[i])
    }

    /// Number of unscheduled jobs.
    pub fn len(&self) -> usize {
        self.unscheduled.len()
    }

    /// Whether every job has been placed.
    pub fn is_empty(&self) -> bool {
        self.unscheduled.is_empty()
    }
}

/// Precedence graph as successor counts and predecessor lists.
struct PrecedenceArena {
    open_successors: Vec<usize>,
    predecessors: Vec<Vec<usize>>,
}

impl PrecedenceArena {
    fn build(jobs: &JobSet) -> Self {
        let n = jobs.len();
        let mut open_successors = vec![0; n];
        let mut predecessors = vec![Vec::new(); n];

        for (i, job) in jobs.iter().enumerate() {
            let unique: HashSet<usize> = job
                .successors
                .iter()
                .filter_map(|s| jobs.index_of(s))
                .collect();
            open_successors[i] = unique.len();
            for s in unique {
                predecessors[s].push(i);
            }
        }

        Self {
            open_successors,
            predecessors,
        }
    }

    fn is_ready(&self, i: usize) -> bool {
        self.open_successors[i] == 0
    }

    fn remove(&mut self, i: usize) {
        for &pred in &self.predecessors[i] {
            self.open_successors[pred] -= 1;
        }
    }
}

/// LCL solver parameterized by its cost function.
///
/// # Example
/// ```
/// use u_sequence::models::{Job, JobSet};
/// use u_sequence::sequencing::lcl::{cost, Lcl};
///
/// let jobs = JobSet::new(vec![
///     Job::new("A").with_processing_time(2).with_due_date(3).with_successor("B"),
///     Job::new("B").with_processing_time(1).with_due_date(2),
/// ]).unwrap();
///
/// let result = Lcl::new(cost::MaxLateness).solve(&jobs).unwrap();
/// assert_eq!(result.sequence, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct Lcl<C> {
    cost: C,
    record_trace: bool,
}

impl<C: CostFunction> Lcl<C> {
    /// Creates a solver using `cost` as `h`.
    pub fn new(cost: C) -> Self {
        Self {
            cost,
            record_trace: true,
        }
    }

    /// Creates a solver from shared options.
    pub fn from_config(cost: C, config: &SequencingConfig) -> Self {
        Self {
            cost,
            record_trace: config.record_trace,
        }
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// The cost function in use.
    pub fn cost(&self) -> &C {
        &self.cost
    }

    /// Builds the sequence backward.
    ///
    /// The objective is the largest cost among the chosen steps; each
    /// step's cost is recorded in the trace.
    pub fn solve(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        let mut required = vec![Attribute::ProcessingTime];
        required.extend(self.cost.required_attributes());
        jobs.require(&required)?;
        jobs.require_known_successors()?;

        let n = jobs.len();
        let mut arena = PrecedenceArena::build(jobs);
        let mut placed = vec![false; n];
        let mut unscheduled: Vec<usize> = (0..n).collect();
        let mut remaining_p = jobs.total_processing_time();
        let mut reversed = Vec::with_capacity(n);
        let mut rec = TraceRecorder::new(self.record_trace);
        let mut max_cost = f64::NEG_INFINITY;

        while !unscheduled.is_empty() {
            let ready: Vec<usize> = unscheduled
                .iter()
                .copied()
                .filter(|&i| arena.is_ready(i))
                .collect();

            let view = RemainingJobs {
                jobs,
                unscheduled: &unscheduled,
                placed: &placed,
                processing_time: remaining_p,
            };
            let mut best: Option<(usize, f64)> = None;
            for &i in &ready {
                let job = jobs.job(i);
                let cost = self.cost.evaluate(&view, jobs, job);
                if cost.is_nan() {
                    debug!(job = %job.id, completion = remaining_p, "LCL cost is NaN");
                    return Err(SequencingError::UndefinedCost {
                        job_id: job.id.clone(),
                        completion: remaining_p,
                    });
                }
                // Strict comparison keeps the first candidate on ties
                if best.map_or(true, |(_, b)| cost < b) {
                    best = Some((i, cost));
                }
            }

            let Some((chosen, cost)) = best else {
                let cycle = validation::find_cycle(jobs, &unscheduled)
                    .unwrap_or_else(|| ids_of(jobs, &unscheduled));
                debug!(unscheduled = unscheduled.len(), "LCL stuck on precedence cycle");
                return Err(SequencingError::Graph { cycle });
            };

            let job = jobs.job(chosen);
            trace!(job = %job.id, cost, completion = remaining_p, "placed last");
            rec.record(&job.id, || StepAction::CostSelected {
                cost,
                candidates: ids_of(jobs, &ready),
            });

            max_cost = max_cost.max(cost);
            placed[chosen] = true;
            unscheduled.retain(|&i| i != chosen);
            remaining_p -= job.p();
            arena.remove(chosen);
            reversed.push(chosen);
        }

        reversed.reverse();
        debug!(jobs = n, max_cost, cost = self.cost.name(), "LCL sequence computed");

        Ok(SequenceResult::new(self.name(), ids_of(jobs, &reversed))
            .with_objective(max_cost)
            .with_trace(rec.finish()))
    }
}

impl<C: CostFunction> Sequencer for Lcl<C> {
    fn name(&self) -> &'static str {
        "LCL"
    }

    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        self.solve(jobs)
    }

    fn description(&self) -> &'static str {
        "Lowest Cost Last (Lawler)"
    }
}

/// Runs LCL with `cost` and default options.
pub fn solve<C: CostFunction>(jobs: &JobSet, cost: C) -> SequencingResult<SequenceResult> {
    Lcl::new(cost).solve(jobs)
}
