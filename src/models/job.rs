//! Job model.
//!
//! A job is a unit of work for a single machine. Attributes are optional
//! because each algorithm needs a different subset; `JobSet::require`
//! checks the subset before any solver runs.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use std::fmt;

use serde::{Deserialize, Serialize};

/// A job to be sequenced.
///
/// Times are plain integers in whatever unit the caller uses; the solvers
/// never interpret them as wall-clock values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    #[serde(default)]
    pub id: String,
    /// Processing time `p_j`.
    #[serde(rename = "processingtime", default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<i64>,
    /// Due date `d_j` (soft; lateness is allowed).
    #[serde(rename = "duedate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    /// Deadline `d̄_j` (hard; the job must finish by it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    /// Weight `w_j`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Jobs that may only start after this one completes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub successors: Vec<String>,
}

impl Job {
    /// Creates a job with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            processing_time: None,
            due_date: None,
            deadline: None,
            weight: None,
            successors: Vec::new(),
        }
    }

    /// Sets the processing time.
    pub fn with_processing_time(mut self, p: i64) -> Self {
        self.processing_time = Some(p);
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, d: i64) -> Self {
        self.due_date = Some(d);
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: i64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, w: f64) -> Self {
        self.weight = Some(w);
        self
    }

    /// Adds a successor (this job must precede `id`).
    pub fn with_successor(mut self, id: impl Into<String>) -> Self {
        self.successors.push(id.into());
        self
    }

    /// Processing time, zero when absent.
    #[inline]
    pub fn p(&self) -> i64 {
        self.processing_time.unwrap_or(0)
    }

    /// Whether the job carries the given attribute.
    pub fn has(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::ProcessingTime => self.processing_time.is_some(),
            Attribute::DueDate => self.due_date.is_some(),
            Attribute::Deadline => self.deadline.is_some(),
            Attribute::Weight => self.weight.is_some(),
        }
    }
}

/// A job attribute an algorithm may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    ProcessingTime,
    DueDate,
    Deadline,
    Weight,
}

impl Attribute {
    /// Field name as it appears in JSON input.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::ProcessingTime => "processingtime",
            Self::DueDate => "duedate",
            Self::Deadline => "deadline",
            Self::Weight => "weight",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
