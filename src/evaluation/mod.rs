//! Sequence evaluation.
//!
//! Scores a finished sequence against the classic single-machine
//! objectives so results from different algorithms can be compared on
//! the same job set.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1-3
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod kpi;

pub use kpi::SequenceKpi;
