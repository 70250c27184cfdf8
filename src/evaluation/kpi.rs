//! Sequence quality metrics (KPIs).
//!
//! Computes standard single-machine performance measures for any
//! sequence over a job set, independent of the algorithm that produced
//! it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Completion time of the last job |
//! | Total Completion | ΣC_j |
//! | Total Weighted Completion | Σw_jC_j (all jobs weighted) |
//! | Late Jobs | ΣU_j, count with C_j > d_j |
//! | Maximum Lateness | max(C_j - d_j) |
//! | Total Tardiness | Σmax(0, C_j - d_j) |
//! | Deadline Misses | count with C_j > d̄_j |
//!
//! Lateness uses the due date, falling back to the deadline for jobs
//! that only carry one. Integer sums and differences saturate at the
//! `i64` bounds.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{JobSet, Timeline};

/// Sequence performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceKpi {
    /// Completion time of the last job.
    pub makespan: i64,
    /// Sum of completion times.
    pub total_completion_time: i64,
    /// Sum of weighted completion times; `None` unless every job has a weight.
    pub total_weighted_completion_time: Option<f64>,
    /// Jobs finishing after their due date.
    pub late_jobs: usize,
    /// Largest lateness; `None` if no job has a due date or deadline.
    pub max_lateness: Option<i64>,
    /// Sum of tardiness.
    pub total_tardiness: i64,
    /// Jobs finishing after their hard deadline.
    pub deadline_misses: usize,
}

impl SequenceKpi {
    /// Computes KPIs for `sequence` placed back-to-back from `t = 0`.
    ///
    /// Ids not in `jobs` are ignored.
    pub fn calculate<S: AsRef<str>>(sequence: &[S], jobs: &JobSet) -> Self {
        Self::from_timeline(&Timeline::build(sequence, jobs), jobs)
    }

    /// Computes KPIs from an existing timeline.
    pub fn from_timeline(timeline: &Timeline, jobs: &JobSet) -> Self {
        let mut total_completion: i64 = 0;
        let mut weighted: Option<f64> = Some(0.0);
        let mut late_jobs = 0;
        let mut max_lateness: Option<i64> = None;
        let mut total_tardiness: i64 = 0;
        let mut deadline_misses = 0;

        for entry in &timeline.entries {
            let Some(job) = jobs.get(&entry.job_id) else {
                continue;
            };
            let completion = entry.end;
            total_completion = total_completion.saturating_add(completion);

            weighted = match (weighted, job.weight) {
                (Some(sum), Some(w)) => Some(sum + w * completion as f64),
                _ => None,
            };

            if let Some(due) = job.due_date.or(job.deadline) {
                let lateness = completion.saturating_sub(due);
                max_lateness = Some(max_lateness.map_or(lateness, |m| m.max(lateness)));
                if lateness > 0 {
                    late_jobs += 1;
                    total_tardiness = total_tardiness.saturating_add(lateness);
                }
            }

            if job.deadline.is_some_and(|d| completion > d) {
                deadline_misses += 1;
            }
        }

        Self {
            makespan: timeline.makespan(),
            total_completion_time: total_completion,
            total_weighted_completion_time: weighted,
            late_jobs,
            max_lateness,
            total_tardiness,
            deadline_misses,
        }
    }

    /// Whether every hard deadline is met.
    pub fn meets_deadlines(&self) -> bool {
        self.deadline_misses == 0
    }

    /// Whether the sequence meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_late_jobs: usize, max_tardiness: i64) -> bool {
        self.late_jobs <= max_late_jobs && self.total_tardiness <= max_tardiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn jobs() -> JobSet {
        JobSet::new(vec![
            Job::new("A")
                .with_processing_time(5)
                .with_due_date(10)
                .with_weight(1.0),
            Job::new("B")
                .with_processing_time(4)
                .with_due_date(8)
                .with_weight(2.0),
            Job::new("C")
                .with_processing_time(6)
                .with_due_date(12)
                .with_weight(0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = SequenceKpi::calculate(&["B", "A", "C"], &jobs());
        assert_eq!(kpi.makespan, 15);
        // C = 4, 9, 15
        assert_eq!(kpi.total_completion_time, 28);
        assert!((kpi.total_weighted_completion_time.unwrap() - 33.5).abs() < 1e-10);
        assert_eq!(kpi.late_jobs, 1);
        assert_eq!(kpi.max_lateness, Some(3));
        assert_eq!(kpi.total_tardiness, 3);
        assert!(kpi.meets_deadlines());
    }

    #[test]
    fn test_kpi_tardiness() {
        // C = 6, 11, 15 → lateness -6, 1, 7
        let kpi = SequenceKpi::calculate(&["C", "A", "B"], &jobs());
        assert_eq!(kpi.late_jobs, 2);
        assert_eq!(kpi.total_tardiness, 8);
        assert_eq!(kpi.max_lateness, Some(7));
        assert!(kpi.meets_thresholds(2, 8));
        assert!(!kpi.meets_thresholds(1, 8));
        assert!(!kpi.meets_thresholds(2, 7));
    }

    #[test]
    fn test_kpi_deadlines() {
        let set = JobSet::new(vec![
            Job::new("A").with_processing_time(3).with_deadline(3),
            Job::new("B").with_processing_time(2).with_deadline(4),
        ])
        .unwrap();
        let ok = SequenceKpi::calculate(&["A", "B"], &set);
        assert_eq!(ok.deadline_misses, 1);
        assert_eq!(ok.late_jobs, 1);
        assert!(!ok.meets_deadlines());
        assert_eq!(ok.total_weighted_completion_time, None);
    }

    #[test]
    fn test_kpi_extreme_values_saturate() {
        let half = i64::MAX / 2;
        let set = JobSet::new(vec![
            Job::new("A").with_processing_time(half).with_due_date(i64::MIN),
            Job::new("B").with_processing_time(half).with_due_date(i64::MIN),
        ])
        .unwrap();
        let kpi = SequenceKpi::calculate(&["A", "B"], &set);
        assert_eq!(kpi.total_completion_time, i64::MAX);
        assert_eq!(kpi.max_lateness, Some(i64::MAX));
        assert_eq!(kpi.total_tardiness, i64::MAX);
        assert_eq!(kpi.late_jobs, 2);
    }

    #[test]
    fn test_kpi_no_dates() {
        let set = JobSet::new(vec![Job::new("A").with_processing_time(3)]).unwrap();
        let kpi = SequenceKpi::calculate(&["A", "missing"], &set);
        assert_eq!(kpi.makespan, 3);
        assert_eq!(kpi.max_lateness, None);
        assert_eq!(kpi.late_jobs, 0);
    }
}
