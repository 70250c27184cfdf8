//! Sequence (solution) model.
//!
//! A sequence is a total order of job ids on the single machine. The
//! timeline derived from it (start/end per job, no idle time) is what a
//! Gantt or report renderer consumes.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::JobSet;

/// Output of a sequencing algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceResult {
    /// Name of the algorithm that produced this sequence.
    pub algorithm: String,
    /// Job ids in processing order.
    pub sequence: Vec<String>,
    /// Objective value achieved, when the algorithm defines one.
    pub objective: Option<f64>,
    /// Construction steps, in the order they were taken.
    pub trace: Vec<TraceStep>,
}

/// One construction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Zero-based step number.
    pub step: usize,
    /// Job acted on.
    pub job_id: String,
    /// What happened to it.
    pub action: StepAction,
}

/// Kinds of construction steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepAction {
    /// Appended at the next forward position, finishing at `completion`.
    Appended { completion: i64 },
    /// Ranked by a priority index (WDSPT).
    Ranked { index: f64 },
    /// Kept on time by Hodgson's scan.
    Accepted { completion: i64 },
    /// Evicted to the overdue set because `trigger` would finish late.
    Evicted {
        trigger: String,
        completion: i64,
        due_date: i64,
    },
    /// Placed at the last open position with the minimal cost (LCL).
    CostSelected { cost: f64, candidates: Vec<String> },
    /// Placed at the last open position finishing at `tau` (MinSumC).
    BudgetSelected { tau: i64, candidates: Vec<String> },
}

/// A job placed on the machine timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    /// Job id.
    pub job_id: String,
    /// Start time.
    pub start: i64,
    /// Completion time.
    pub end: i64,
}

impl ScheduledJob {
    /// Processing duration.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Back-to-back placement of a sequence starting at `t = 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Scheduled jobs in sequence order.
    pub entries: Vec<ScheduledJob>,
}

impl Timeline {
    /// Places `sequence` back-to-back using processing times from `jobs`.
    ///
    /// Ids not present in `jobs` are skipped.
    pub fn build<S: AsRef<str>>(sequence: &[S], jobs: &JobSet) -> Self {
        let mut now: i64 = 0;
        let entries = sequence
            .iter()
            .filter_map(|id| jobs.get(id.as_ref()))
            .map(|job| {
                let start = now;
                now = now.saturating_add(job.p());
                ScheduledJob {
                    job_id: job.id.clone(),
                    start,
                    end: now,
                }
            })
            .collect();
        Self { entries }
    }

    /// Latest completion time.
    pub fn makespan(&self) -> i64 {
        self.entries.last().map(|e| e.end).unwrap_or(0)
    }

    /// Completion time of a job.
    pub fn completion_time(&self, job_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.job_id == job_id)
            .map(|e| e.end)
    }

    /// Number of scheduled jobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SequenceResult {
    pub(crate) fn new(algorithm: &str, sequence: Vec<String>) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            sequence,
            objective: None,
            trace: Vec::new(),
        }
    }

    pub(crate) fn with_objective(mut self, objective: f64) -> Self {
        self.objective = Some(objective);
        self
    }

    pub(crate) fn with_trace(mut self, trace: Vec<TraceStep>) -> Self {
        self.trace = trace;
        self
    }

    /// Timeline for this sequence.
    pub fn timeline(&self, jobs: &JobSet) -> Timeline {
        Timeline::build(&self.sequence, jobs)
    }

    /// Position of a job in the sequence.
    pub fn position(&self, job_id: &str) -> Option<usize> {
        self.sequence.iter().position(|id| id == job_id)
    }

    /// Number of jobs sequenced.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Collects trace steps when enabled; otherwise a no-op.
#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    enabled: bool,
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, job_id: &str, action: impl FnOnce() -> StepAction) {
        if self.enabled {
            let step = self.steps.len();
            self.steps.push(TraceStep {
                step,
                job_id: job_id.to_string(),
                action: action(),
            });
        }
    }

    pub(crate) fn finish(self) -> Vec<TraceStep> {
        self.steps
    }
}
