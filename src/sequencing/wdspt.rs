//! Weighted Discounted Shortest Processing Time.
//!
//! Orders jobs by the index `w · e^(-r·p) / (1 - e^(-r·p))`, highest
//! first, which minimizes the total discounted weighted completion time
//! `Σ w_j (1 - e^(-r·C_j))`. As `r → 0⁺` the index approaches
//! `w / (r·p)`, so the order converges to Smith's WSPT rule.
//!
//! `1 - e^(-x)` is evaluated as `-expm1(-x)` to keep precision for small
//! `r·p`. Jobs are ranked by the logarithm of the index,
//! `ln w - x - ln(1 - e^(-x))`, which stays finite long after `e^(-x)`
//! underflows (`r·p` above ~745).
//!
//! # Reference
//! Rothkopf (1966), "Scheduling Independent Tasks on Parallel Processors";
//! Pinedo (2016), Ch. 3.1

use tracing::{debug, trace};

use super::{ids_of, Sequencer};
use crate::config::SequencingConfig;
use crate::error::{SequencingError, SequencingResult, ValidationErrorKind, ValidationIssue};
use crate::models::{Attribute, JobSet, SequenceResult, StepAction, TraceRecorder};

const REQUIRED: [Attribute; 2] = [Attribute::ProcessingTime, Attribute::Weight];

/// WDSPT solver with discount rate `r`.
#[derive(Debug, Clone, Copy)]
pub struct Wdspt {
    rate: f64,
    record_trace: bool,
}

impl Wdspt {
    /// Creates a solver with discount rate `rate`.
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            record_trace: true,
        }
    }

    /// Creates a solver from shared options.
    pub fn from_config(config: &SequencingConfig) -> Self {
        Self {
            rate: config.discount_rate,
            record_trace: config.record_trace,
        }
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Discount rate in use.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Priority index of one job; higher is scheduled earlier.
    pub fn index(&self, job_id: &str, processing_time: i64, weight: f64) -> SequencingResult<f64> {
        let x = self.rate * processing_time as f64;
        let denominator = -(-x).exp_m1();
        let index = weight * (-x).exp() / denominator;
        if denominator <= 0.0 || !index.is_finite() {
            return Err(SequencingError::NumericDegeneracy {
                job_id: job_id.to_string(),
                processing_time,
                rate: self.rate,
            });
        }
        Ok(index)
    }

    /// Natural logarithm of [`index`](Self::index), used for ranking.
    ///
    /// A zero weight gives `-inf`, which ranks last.
    pub fn log_index(&self, job_id: &str, processing_time: i64, weight: f64) -> SequencingResult<f64> {
        let x = self.rate * processing_time as f64;
        let denominator = -(-x).exp_m1();
        let log_index = weight.ln() - x - denominator.ln();
        if denominator <= 0.0 || log_index.is_nan() || log_index == f64::INFINITY {
            return Err(SequencingError::NumericDegeneracy {
                job_id: job_id.to_string(),
                processing_time,
                rate: self.rate,
            });
        }
        Ok(log_index)
    }

    /// Sorts `jobs` by non-increasing index and reports the realized
    /// discounted weighted completion time.
    pub fn solve(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(SequencingError::validation(ValidationIssue::new(
                ValidationErrorKind::InvalidParameter,
                format!("discount rate must be positive and finite, got {}", self.rate),
            )));
        }
        jobs.require(&REQUIRED)?;

        let indices = jobs
            .iter()
            .map(|job| self.log_index(&job.id, job.p(), job.weight.unwrap_or(0.0)))
            .collect::<SequencingResult<Vec<f64>>>()?;

        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by(|&a, &b| indices[b].total_cmp(&indices[a]));

        let mut rec = TraceRecorder::new(self.record_trace);
        let mut completion = 0;
        let mut objective = 0.0;
        for &i in &order {
            let job = jobs.job(i);
            completion += job.p();
            objective += job.weight.unwrap_or(0.0) * discount(self.rate, completion);
            let index = indices[i].exp();
            trace!(job = %job.id, log_index = indices[i], completion, "ranked");
            rec.record(&job.id, || StepAction::Ranked { index });
        }

        debug!(jobs = jobs.len(), rate = self.rate, objective, "WDSPT sequence computed");

        Ok(SequenceResult::new(self.name(), ids_of(jobs, &order))
            .with_objective(objective)
            .with_trace(rec.finish()))
    }
}

/// `1 - e^(-r·t)`.
fn discount(rate: f64, t: i64) -> f64 {
    -(-rate * t as f64).exp_m1()
}

impl Sequencer for Wdspt {
    fn name(&self) -> &'static str {
        "WDSPT"
    }

    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        self.solve(jobs)
    }

    fn description(&self) -> &'static str {
        "Weighted Discounted Shortest Processing Time"
    }
}

/// Runs WDSPT with discount rate `rate`.
pub fn solve(jobs: &JobSet, rate: f64) -> SequencingResult<SequenceResult> {
    Wdspt::new(rate).solve(jobs)
}
