//! Sequencing domain models.
//!
//! Provides the job data shared by every algorithm and the types that
//! describe a finished sequence.
//!
//! | Type | Role |
//! |------|------|
//! | `Job` | One unit of work with optional attributes |
//! | `JobSet` | Validated, ordered, non-empty collection of jobs |
//! | `SequenceResult` | Order of job ids, objective, construction trace |
//! | `Timeline` | Per-job start/end for a sequence (renderer input) |

mod job;
mod job_set;
mod sequence;

pub use job::{Attribute, Job};
pub use job_set::JobSet;
pub use sequence::{ScheduledJob, SequenceResult, StepAction, Timeline, TraceStep};

pub(crate) use sequence::TraceRecorder;
