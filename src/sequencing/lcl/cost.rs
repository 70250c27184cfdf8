//! Cost functions for LCL.
//!
//! A cost function is the `h` in Lawler's rule: given the unscheduled
//! jobs and a candidate, it returns the cost the candidate would incur if
//! it finished last among them, i.e. at `remaining.total_processing_time()`.
//! Lawler's rule is optimal when every `h_j` is non-decreasing in that
//! completion time.
//!
//! # Built-ins
//!
//! - **Due-date**: `MaxLateness`, `Tardiness`, `WeightedTardiness`
//! - **Completion**: `WeightedCompletion`
//! - **Composition**: `PerJobCost` (one function per job), `from_fn`
//!
//! # Score Convention
//! Lower cost = placed later. A NaN cost aborts LCL with
//! [`SequencingError::UndefinedCost`](crate::error::SequencingError::UndefinedCost)
//! naming the job.

use std::collections::HashMap;
use std::fmt;

use super::RemainingJobs;
use crate::sequencing::lateness;
use crate::models::{Attribute, Job, JobSet};

/// The `h` function evaluated by LCL.
pub trait CostFunction: Send + Sync {
    /// Cost function name used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    /// Attributes every job must carry for `evaluate` to be meaningful.
    ///
    /// LCL checks these before the construction starts.
    fn required_attributes(&self) -> Vec<Attribute> {
        Vec::new()
    }

    /// Cost of placing `job` last among `remaining`.
    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64;
}

impl<C: CostFunction + ?Sized> CostFunction for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn required_attributes(&self) -> Vec<Attribute> {
        (**self).required_attributes()
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64 {
        (**self).evaluate(remaining, jobs, job)
    }
}

/// Lateness `C - d_j`.
#[derive(Debug, Clone, Copy)]
pub struct MaxLateness;

impl CostFunction for MaxLateness {
    fn name(&self) -> &str {
        "max-lateness"
    }

    fn required_attributes(&self) -> Vec<Attribute> {
        vec![Attribute::DueDate]
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, _jobs: &JobSet, job: &Job) -> f64 {
        let completion = remaining.total_processing_time();
        lateness(completion, job.due_date.unwrap_or(completion))
    }
}

/// Tardiness `max(0, C - d_j)`.
#[derive(Debug, Clone, Copy)]
pub struct Tardiness;

impl CostFunction for Tardiness {
    fn name(&self) -> &str {
        "tardiness"
    }

    fn required_attributes(&self) -> Vec<Attribute> {
        vec![Attribute::DueDate]
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64 {
        MaxLateness.evaluate(remaining, jobs, job).max(0.0)
    }
}

/// Weighted tardiness `w_j * max(0, C - d_j)`.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTardiness;

impl CostFunction for WeightedTardiness {
    fn name(&self) -> &str {
        "weighted-tardiness"
    }

    fn required_attributes(&self) -> Vec<Attribute> {
        vec![Attribute::DueDate, Attribute::Weight]
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64 {
        job.weight.unwrap_or(1.0) * Tardiness.evaluate(remaining, jobs, job)
    }
}

/// Weighted completion time `w_j * C`.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCompletion;

impl CostFunction for WeightedCompletion {
    fn name(&self) -> &str {
        "weighted-completion"
    }

    fn required_attributes(&self) -> Vec<Attribute> {
        vec![Attribute::Weight]
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, _jobs: &JobSet, job: &Job) -> f64 {
        job.weight.unwrap_or(1.0) * remaining.total_processing_time() as f64
    }
}

/// A cost function backed by a closure. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnCost<F> {
    f: F,
}

/// Wraps a closure `|remaining, jobs, job| -> f64` as a cost function.
///
/// ```
/// use u_sequence::models::{Job, JobSet};
/// use u_sequence::sequencing::lcl::{self, cost};
///
/// let jobs = JobSet::new(vec![
///     Job::new("A").with_processing_time(3),
///     Job::new("B").with_processing_time(1),
/// ]).unwrap();
///
/// // Quadratic completion-time penalty
/// let h = cost::from_fn(|remaining, _, _| (remaining.total_processing_time() as f64).powi(2));
/// let result = lcl::solve(&jobs, h).unwrap();
/// assert_eq!(result.len(), 2);
/// ```
pub fn from_fn<F>(f: F) -> FnCost<F>
where
    F: Fn(&RemainingJobs<'_>, &JobSet, &Job) -> f64 + Send + Sync,
{
    FnCost { f }
}

impl<F> CostFunction for FnCost<F>
where
    F: Fn(&RemainingJobs<'_>, &JobSet, &Job) -> f64 + Send + Sync,
{
    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64 {
        (self.f)(remaining, jobs, job)
    }
}

impl<F> fmt::Debug for FnCost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCost")
    }
}

/// A separate cost function per job, with a default for the rest.
pub struct PerJobCost {
    default: Box<dyn CostFunction>,
    overrides: HashMap<String, Box<dyn CostFunction>>,
}

impl PerJobCost {
    /// Uses `default` for every job without an override.
    pub fn new<C: CostFunction + 'static>(default: C) -> Self {
        Self {
            default: Box::new(default),
            overrides: HashMap::new(),
        }
    }

    /// Uses `cost` for the job `job_id`.
    pub fn with_job<C: CostFunction + 'static>(mut self, job_id: impl Into<String>, cost: C) -> Self {
        self.overrides.insert(job_id.into(), Box::new(cost));
        self
    }

    fn for_job(&self, job_id: &str) -> &dyn CostFunction {
        self.overrides
            .get(job_id)
            .map(|c| c.as_ref())
            .unwrap_or(self.default.as_ref())
    }
}

impl CostFunction for PerJobCost {
    fn name(&self) -> &str {
        "per-job"
    }

    // Union over all functions; overrides for absent jobs still count.
    fn required_attributes(&self) -> Vec<Attribute> {
        let mut attrs = self.default.required_attributes();
        for cost in self.overrides.values() {
            for attr in cost.required_attributes() {
                if !attrs.contains(&attr) {
                    attrs.push(attr);
                }
            }
        }
        attrs
    }

    fn evaluate(&self, remaining: &RemainingJobs<'_>, jobs: &JobSet, job: &Job) -> f64 {
        self.for_job(&job.id).evaluate(remaining, jobs, job)
    }
}

impl fmt::Debug for PerJobCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut jobs: Vec<&String> = self.overrides.keys().collect();
        jobs.sort();
        f.debug_struct("PerJobCost")
            .field("default", &self.default.name())
            .field("overrides", &jobs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> JobSet {
        JobSet::new(vec![
            Job::new("A")
                .with_processing_time(4)
                .with_due_date(3)
                .with_weight(2.0),
            Job::new("B")
                .with_processing_time(2)
                .with_due_date(10)
                .with_weight(0.5),
        ])
        .unwrap()
    }

    fn view<'a>(jobs: &'a JobSet, unscheduled: &'a [usize], placed: &'a [bool]) -> RemainingJobs<'a> {
        let processing_time = unscheduled.iter().map(|&i| jobs.job(i).p()).sum();
        RemainingJobs {
            jobs,
            unscheduled,
            placed,
            processing_time,
        }
    }

    #[test]
    fn test_due_date_costs() {
        let set = jobs();
        let placed = [false, false];
        let rem = view(&set, &[0, 1], &placed);
        let a = set.job(0);
        let b = set.job(1);

        // C = 6
        assert_eq!(MaxLateness.evaluate(&rem, &set, a), 3.0);
        assert_eq!(MaxLateness.evaluate(&rem, &set, b), -4.0);
        assert_eq!(Tardiness.evaluate(&rem, &set, b), 0.0);
        assert_eq!(WeightedTardiness.evaluate(&rem, &set, a), 6.0);
    }

    #[test]
    fn test_weighted_completion() {
        let set = jobs();
        let placed = [true, false];
        let rem = view(&set, &[1], &placed);
        assert_eq!(rem.total_processing_time(), 2);
        assert!(!rem.contains("A"));
        assert!(rem.contains("B"));
        assert_eq!(WeightedCompletion.evaluate(&rem, &set, set.job(1)), 1.0);
    }

    #[test]
    fn test_required_attributes() {
        assert!(from_fn(|_, _, _| 0.0).required_attributes().is_empty());
        assert_eq!(
            WeightedTardiness.required_attributes(),
            vec![Attribute::DueDate, Attribute::Weight]
        );

        let per_job = PerJobCost::new(MaxLateness)
            .with_job("A", WeightedTardiness)
            .with_job("B", Tardiness);
        let attrs = per_job.required_attributes();
        assert_eq!(attrs.len(), 2);
        assert!(attrs.contains(&Attribute::Weight));
    }

    #[test]
    fn test_per_job_dispatch() {
        let set = jobs();
        let placed = [false, false];
        let rem = view(&set, &[0, 1], &placed);
        let per_job = PerJobCost::new(MaxLateness).with_job("B", from_fn(|_, _, _| 42.0));
        assert_eq!(per_job.evaluate(&rem, &set, set.job(0)), 3.0);
        assert_eq!(per_job.evaluate(&rem, &set, set.job(1)), 42.0);
        assert!(format!("{per_job:?}").contains("max-lateness"));
    }

    #[test]
    fn test_boxed_cost() {
        let set = jobs();
        let placed = [false, false];
        let rem = view(&set, &[0, 1], &placed);
        let boxed: Box<dyn CostFunction> = Box::new(MaxLateness);
        assert_eq!(boxed.name(), "max-lateness");
        assert_eq!(boxed.evaluate(&rem, &set, set.job(0)), 3.0);
    }
}
