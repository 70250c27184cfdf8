//! Single-machine sequencing for the U-Engine ecosystem.
//!
//! Orders a set of independent jobs on one machine using the classic
//! exact and greedy rules: due-date ordering, late-job minimization,
//! precedence-constrained bottleneck cost, discounted weighted completion
//! and total completion under hard deadlines.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `JobSet`, `SequenceResult`,
//!   `Timeline`, `TraceStep`
//! - **`sequencing`**: Algorithms — `Edd`, `Hodgson`, `Lcl`, `Wdspt`,
//!   `MinSumCompletion`, behind the `Sequencer` trait
//! - **`evaluation`**: `SequenceKpi` (lateness, tardiness, completion metrics)
//! - **`validation`**: Input integrity checks (duplicate IDs, missing
//!   attributes, precedence cycles)
//! - **`permutation`**: Lazy lexicographic permutations
//! - **`config`**: Shared solver options
//!
//! # Example
//!
//! ```
//! use u_sequence::models::JobSet;
//! use u_sequence::sequencing::{Edd, Sequencer};
//!
//! let jobs = JobSet::from_json(r#"{
//!     "A": {"processingtime": 3, "duedate": 7},
//!     "B": {"processingtime": 2, "duedate": 4}
//! }"#).unwrap();
//!
//! let result = Edd::new().sequence(&jobs).unwrap();
//! assert_eq!(result.sequence, vec!["B", "A"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod permutation;
pub mod sequencing;
pub mod validation;

pub use config::SequencingConfig;
pub use error::{SequencingError, SequencingResult};
