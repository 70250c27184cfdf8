//! Single-machine sequencing algorithms.
//!
//! Each algorithm is a solver struct with a `solve` method plus a free
//! `solve` shorthand using default options. All solvers validate eagerly,
//! borrow the job set immutably, and return explicit errors instead of
//! partial sequences.
//!
//! | Module | Criterion | Construction |
//! |--------|-----------|--------------|
//! | [`edd`] | max lateness `L_max` | forward sort by due date |
//! | [`hodgson`] | number of late jobs `ΣU_j` | EDD scan with evictions |
//! | [`lcl`] | max regular cost `h_max` under precedence | backward, min cost last |
//! | [`wdspt`] | `Σ w_j (1 - e^(-r C_j))` | sort by discounted index |
//! | [`min_sum_c`] | `ΣC_j` subject to deadlines | backward, longest feasible last |
//!
//! # Usage
//!
//! ```
//! use u_sequence::models::{Job, JobSet};
//! use u_sequence::sequencing::{edd, Sequencer};
//!
//! let jobs = JobSet::new(vec![
//!     Job::new("A").with_processing_time(5).with_due_date(10),
//!     Job::new("B").with_processing_time(4).with_due_date(8),
//!     Job::new("C").with_processing_time(6).with_due_date(12),
//! ]).unwrap();
//!
//! let result = edd::Edd::new().sequence(&jobs).unwrap();
//! assert_eq!(result.sequence, vec!["B", "A", "C"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod edd;
pub mod hodgson;
pub mod lcl;
pub mod min_sum_c;
pub mod wdspt;

pub use edd::Edd;
pub use hodgson::{Alternatives, Hodgson, HodgsonResult};
pub use lcl::{CostFunction, Lcl, RemainingJobs};
pub use min_sum_c::MinSumCompletion;
pub use wdspt::Wdspt;

use crate::error::SequencingResult;
use crate::models::{JobSet, SequenceResult};

/// A single-machine sequencing algorithm.
///
/// Implemented by every solver so callers can pick one at runtime.
pub trait Sequencer: Send + Sync {
    /// Algorithm name (e.g., "EDD", "LCL").
    fn name(&self) -> &'static str;

    /// Computes a sequence for `jobs`.
    fn sequence(&self, jobs: &JobSet) -> SequencingResult<SequenceResult>;

    /// Algorithm description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Input positions `0..n` stably sorted by `key`.
pub(crate) fn sorted_positions<K: Ord>(jobs: &JobSet, key: impl Fn(usize) -> K) -> Vec<usize> {
    let mut order: Vec<usize> = (0..jobs.len()).collect();
    order.sort_by_key(|&i| key(i));
    order
}

/// `C - d` in floating point so extreme due dates cannot overflow.
pub(crate) fn lateness(completion: i64, due_date: i64) -> f64 {
    completion as f64 - due_date as f64
}

/// Maps input positions to owned ids.
pub(crate) fn ids_of(jobs: &JobSet, positions: &[usize]) -> Vec<String> {
    positions.iter().map(|&i| jobs.job(i).id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_runtime_selection() {
        let jobs = JobSet::new(vec![
            Job::new("A")
                .with_processing_time(3)
                .with_due_date(9)
                .with_deadline(9)
                .with_weight(1.0),
            Job::new("B")
                .with_processing_time(2)
                .with_due_date(4)
                .with_deadline(5)
                .with_weight(2.0),
        ])
        .unwrap();

        let solvers: Vec<Box<dyn Sequencer>> = vec![
            Box::new(Edd::new()),
            Box::new(Hodgson::new()),
            Box::new(Lcl::new(lcl::cost::MaxLateness)),
            Box::new(Wdspt::new(0.1)),
            Box::new(MinSumCompletion::new()),
        ];

        for solver in &solvers {
            let result = solver.sequence(&jobs).unwrap();
            assert_eq!(result.algorithm, solver.name());
            assert_eq!(result.len(), 2, "{}", solver.name());
            assert_eq!(result.sequence[0], "B", "{}", solver.name());
        }
    }

    #[test]
    fn test_sorted_positions_stable() {
        let jobs = JobSet::new(vec![
            Job::new("A").with_due_date(5),
            Job::new("B").with_due_date(1),
            Job::new("C").with_due_date(5),
        ])
        .unwrap();
        let order = sorted_positions(&jobs, |i| jobs.job(i).due_date);
        assert_eq!(ids_of(&jobs, &order), vec!["B", "A", "C"]);
    }
}
