//! Moore-Hodgson algorithm for minimizing the number of late jobs.
//!
//! # Algorithm
//!
//! 1. Sort jobs by non-decreasing due date (stable).
//! 2. Append jobs one at a time to the accepted set.
//! 3. Whenever the accepted jobs finish after the due date of the job just
//!    appended, evict the accepted job with the largest processing time.
//! 4. Accepted jobs, in due-date order, are all on time; evicted jobs are
//!    late wherever they go.
//!
//! Any ordering of the evicted (overdue) jobs after the on-time prefix is
//! equally optimal. [`HodgsonResult::alternatives`] enumerates them lazily:
//! `m` overdue jobs give `m!` sequences, so large overdue sets should be
//! capped with [`Hodgson::with_max_alternatives`] or consumed with `take`.
//!
//! # Complexity
//! O(n²) for the scan plus O(m!) for full enumeration.
//!
//! # Reference
//! Moore (1968), "An n Job, One Machine Sequencing Algorithm for Minimizing
//! the Number of Late Jobs"

use std::iter::Take;

use tracing::{debug, trace, warn};

use super::{ids_of, sorted_positions, Sequencer};
use crate::config::SequencingConfig;
use crate::error::SequencingResult;
use crate::models::{Attribute, JobSet, SequenceResult, StepAction, TraceRecorder, TraceStep};
use crate::permutation::{factorial, Permutations};

const REQUIRED: [Attribute; 2] = [Attribute::ProcessingTime, Attribute::DueDate];

/// Hodgson solver.
#[derive(Debug, Clone, Copy)]
pub struct Hodgson {
    record_trace: bool,
    max_alternatives: Option<usize>,
}

/// On-time prefix and overdue set produced by Hodgson's scan.
#[derive(Debug, Clone, PartialEq)]
pub struct HodgsonResult {
    /// On-time jobs in due-date order.
    pub on_time: Vec<String>,
    /// Overdue jobs in eviction order.
    pub overdue: Vec<String>,
    /// Scan steps (accept/evict).
    pub trace: Vec<TraceStep>,
    max_alternatives: Option<usize>,
}

impl Hodgson {
    /// Creates a solver with tracing on and no alternative cap.
    pub fn new() -> Self {
        Self {
            record_trace: true,
            max_alternatives: None,
        }
    }

    /// Creates a solver from shared options.
    pub fn from_config(config: &SequencingConfig) -> Self {
        Self {
            record_trace: config.record_trace,
            max_alternatives: config.max_alternatives,
        }
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Caps the number of alternative sequences produced.
    pub fn with_max_alternatives(mut self, max: usize) -> Self {
        self.max_alternatives = Some(max);
        self
    }

    /// Runs the eviction scan.
    pub fn solve(&self, jobs: &JobSet) -> SequencingResult<HodgsonResult> {
        jobs.require(&REQUIRED)?;

        let due = |i: usize| jobs.job(i).due_date.unwrap_or(i64::MAX);
        let order = sorted_positions(jobs, due);
        let mut rec = TraceRecorder::new(self.record_trace);
        let mut accepted: Vec<usize> = Vec::with_capacity(order.len());
        let mut overdue: Vec<usize> = Vec::new();
        let mut completion = 0;

        for &k in &order {
            let job = jobs.job(k);
            accepted.push(k);
            completion += job.p();

            if completion <= due(k) {
                rec.record(&job.id, || StepAction::Accepted { completion });
                continue;
            }

            // Largest processing time among accepted jobs; first wins ties
            let mut victim_pos = 0;
            for (pos, &i) in accepted.iter().enumerate() {
                if jobs.job(i).p() > jobs.job(accepted[victim_pos]).p() {
                    victim_pos = pos;
                }
            }
            let victim = accepted.remove(victim_pos);
            let victim_id = &jobs.job(victim).id;
            trace!(job = %victim_id, trigger = %job.id, completion, due_date = due(k), "evicted");
            rec.record(victim_id, || StepAction::Evicted {
                trigger: job.id.clone(),
                completion,
                due_date: due(k),
            });
            completion -= jobs.job(victim).p();
            overdue.push(victim);
        }

        let result = HodgsonResult {
            on_time: ids_of(jobs, &accepted),
            overdue: ids_of(jobs, &overdue),
            trace: rec.finish(),
            max_alternatives: self.max_alternatives,
        };

        debug!(
            jobs = jobs.len(),
            on_time = result.on_time.len(),
            late = result.late_count(),
            "Hodgson scan complete"
        );
        if let (Some(cap), total) = (self.max_alternatives, result.total_alternatives()) {
            if total.map_or(true, |t| t > cap) {
                warn!(cap, overdue = result.overdue.len(), "Hodgson alternatives capped");
            }
        }

        Ok(result)
    }
}

impl Default for Hodgson {
    fn default() -> Self {
        Self::new()
    }
}

impl HodgsonResult {
    /// Number of late jobs (the minimized objective).
    pub fn late_count(&self) -> usize {
        self.overdue.len()
    }

    /// Number of distinct full sequences, `None` if `m!` overflows.
    pub fn total_alternatives(&self) -> Option<usize> {
        factorial(self.overdue.len())
    }

    /// Number of sequences [`alternatives`](Self::alternatives) will yield.
    pub fn alternative_count(&self) -> usize {
        let total = self.total_alternatives().unwrap_or(usize::MAX);
        self.max_alternatives.map_or(total, |cap| total.min(cap))
    }

    /// Lazily yields `on_time ++ permutation(overdue)` for each ordering
    /// of the overdue set, honoring the configured cap.
    ///
    /// Each call starts over from the first sequence.
    pub fn alternatives(&self) -> Alternatives<'_> {
        Alternatives {
            on_time: &self.on_time,
            perms: Permutations::new(&self.overdue)
                .take(self.max_alternatives.unwrap_or(usize::MAX)),
        }
    }

    /// The first alternative: on-time prefix, then overdue in eviction order.
    pub fn canonical_sequence(&self) -> Vec<String> {
        self.on_time
            .iter()
            .chain(self.overdue.iter())
            .cloned()
            .collect()
    }

    /// The canonical sequence as a [`SequenceResult`].
    pub fn to_sequence_result(&self) -> SequenceResult {
        SequenceResult::new("HODGSON", self.canonical_sequence())
            .with_objective(self.late_count() as f64)
            .with_trace(self.trace.clone())
    }
}

/// Lazy iterator over Hodgson's equally optimal sequences.
#[derive(Debug, Clone)]
pub struct Alternatives<'a> {
    on_time: &'a [String],
    perms: Take<Permutations<'a, String>>,
}

impl Iterator for Alternatives<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let tail = self.perms.next()?;
        let mut full = Vec::with_capacity(self.on_time.len() + tail.len());
        full.extend_from_slice(self.on_time);
        full.extend(tail);
        Some(full)
    }
}

impl Sequencer for Hodgson {
    fn name(&self) -> &'static str {
        "HODGSON"
    }

    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult> {
        Ok(self.solve(jobs)?.to_sequence_result())
    }

    fn description(&self) -> &'static str {
        "Moore-Hodgson minimum late jobs"
    }
}

/// Runs Hodgson's algorithm with default options.
pub fn solve(jobs: &JobSet) -> SequencingResult<HodgsonResult> {
    Hodgson::new().solve(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::evaluation::SequenceKpi;
    use crate::models::Job;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn job(id: &str, p: i64, d: i64) -> Job {
        Job::new(id).with_processing_time(p).with_due_date(d)
    }

    fn late_count(sequence: &[String], jobs: &JobSet) -> usize {
        SequenceKpi::calculate(sequence, jobs).late_jobs
    }

    #[test]
    fn test_single_overdue_job() {
        // Due dates 2, 4, 6, 8, 9; B cannot make 4 after A
        let jobs = JobSet::new(vec![
            job("A", 2, 2),
            job("B", 3, 4),
            job("C", 1, 6),
            job("D", 2, 8),
            job("E", 1, 9),
        ])
        .unwrap();
        let result = solve(&jobs).unwrap();
        assert_eq!(result.on_time, vec!["A", "C", "D", "E"]);
        assert_eq!(result.overdue, vec!["B"]);
        assert_eq!(result.late_count(), 1);

        let alts: Vec<Vec<String>> = result.alternatives().collect();
        assert_eq!(alts, vec![vec!["A", "C", "D", "E", "B"]]);
    }

    #[test]
    fn test_all_on_time() {
        let jobs = JobSet::new(vec![job("A", 5, 10), job("B", 4, 8), job("C", 6, 15)]).unwrap();
        let result = solve(&jobs).unwrap();
        assert!(result.overdue.is_empty());
        assert_eq!(result.alternative_count(), 1);
        let alts: Vec<_> = result.alternatives().collect();
        assert_eq!(alts, vec![vec!["B", "A", "C"]]);
    }

    #[test]
    fn test_eviction_prefers_first_longest() {
        // Three 4-unit jobs due at 4, 5, 6: only one fits
        let jobs = JobSet::new(vec![
            job("A", 4, 4),
            job("B", 4, 5),
            job("C", 4, 6),
            job("D", 1, 7),
        ])
        .unwrap();
        let result = solve(&jobs).unwrap();
        assert_eq!(result.on_time, vec!["C", "D"]);
        assert_eq!(result.overdue, vec!["A", "B"]);

        let alts: Vec<Vec<String>> = result.alternatives().collect();
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0], vec!["C", "D", "A", "B"]);
        assert_eq!(alts[1], vec!["C", "D", "B", "A"]);
        for alt in &alts {
            assert_eq!(late_count(alt, &jobs), 2);
        }
    }

    #[test]
    fn test_trace_records_evictions() {
        let jobs = JobSet::new(vec![job("A", 4, 4), job("B", 4, 5)]).unwrap();
        let result = solve(&jobs).unwrap();
        assert_eq!(result.trace.len(), 2);
        assert_eq!(result.trace[0].action, StepAction::Accepted { completion: 4 });
        assert_eq!(result.trace[1].job_id, "A");
        assert_eq!(
            result.trace[1].action,
            StepAction::Evicted {
                trigger: "B".into(),
                completion: 8,
                due_date: 5
            }
        );
    }

    #[test]
    fn test_alternatives_capped_and_restartable() {
        // Every job is individually infeasible except the last
        let jobs = JobSet::new(vec![
            job("A", 5, 1),
            job("B", 5, 1),
            job("C", 5, 1),
            job("D", 5, 1),
            job("E", 1, 20),
        ])
        .unwrap();
        let result = Hodgson::new().with_max_alternatives(5).solve(&jobs).unwrap();
        assert_eq!(result.late_count(), 4);
        assert_eq!(result.total_alternatives(), Some(24));
        assert_eq!(result.alternative_count(), 5);
        assert_eq!(result.alternatives().count(), 5);

        let first = result.alternatives().next().unwrap();
        assert_eq!(first, result.canonical_sequence());
        assert_eq!(result.alternatives().next().unwrap(), first);
    }

    #[test]
    fn test_sequencer_uses_canonical() {
        let jobs = JobSet::new(vec![job("A", 4, 4), job("B", 4, 5), job("C", 1, 9)]).unwrap();
        let result = Hodgson::new().sequence(&jobs).unwrap();
        assert_eq!(result.sequence, vec!["B", "C", "A"]);
        assert_eq!(result.objective, Some(1.0));
        assert_eq!(result.algorithm, "HODGSON");
    }

    #[test]
    fn test_from_config() {
        let cfg = SequencingConfig::new().with_max_alternatives(1).with_trace(false);
        let jobs = JobSet::new(vec![job("A", 5, 1), job("B", 5, 1)]).unwrap();
        let result = Hodgson::from_config(&cfg).solve(&jobs).unwrap();
        assert!(result.trace.is_empty());
        assert_eq!(result.alternatives().count(), 1);
    }

    #[test]
    fn test_missing_processing_time() {
        let jobs = JobSet::new(vec![Job::new("A").with_due_date(3)]).unwrap();
        let err = solve(&jobs).unwrap_err();
        assert!(err.has_issue(ValidationErrorKind::MissingAttribute));
    }

    #[test]
    fn test_optimal_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..40 {
            let n = rng.random_range(1..=7);
            let jobs: Vec<Job> = (0..n)
                .map(|i| {
                    job(
                        &format!("J{i}"),
                        rng.random_range(1..=6),
                        rng.random_range(1..=18),
                    )
                })
                .collect();
            let set = JobSet::new(jobs).unwrap();
            let result = solve(&set).unwrap();

            let ids: Vec<String> = set.ids().into_iter().map(String::from).collect();
            let best = Permutations::new(&ids)
                .map(|perm| late_count(&perm, &set))
                .min()
                .unwrap();

            assert_eq!(result.on_time.len(), set.len() - best);
            for alt in result.alternatives() {
                assert_eq!(late_count(&alt, &set), best);
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let jobs = JobSet::new(vec![
            job("A", 2, 2),
            job("B", 3, 4),
            job("C", 1, 6),
            job("D", 2, 8),
        ])
        .unwrap();
        let first = solve(&jobs).unwrap().canonical_sequence();
        let again = solve(&jobs.reordered(&first).unwrap()).unwrap();
        assert_eq!(again.canonical_sequence(), first);
    }
}
