//! Error taxonomy for sequencing.
//!
//! Validation problems are collected eagerly, before any algorithmic work,
//! so a failed call never leaves partial state behind. Failures detected
//! mid-construction (a precedence cycle, an exhausted deadline budget, an
//! undefined priority index) abort immediately and name the jobs involved.

use std::fmt;

use thiserror::Error;

/// Result alias used by every solver.
pub type SequencingResult<T> = Result<T, SequencingError>;

/// Errors raised by job-set construction and the sequencing algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequencingError {
    /// Malformed input: missing attributes, bad values, empty set.
    #[error("invalid job data: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// The successor relation contains a cycle.
    #[error("precedence graph contains a cycle: {}", .cycle.join(" -> "))]
    Graph {
        /// Job ids along the cycle; the first id is repeated at the end.
        cycle: Vec<String>,
    },

    /// No unplaced job can finish at the current time budget.
    #[error("no job may complete at time {tau}; unplaced jobs: {}", .unplaced.join(", "))]
    Infeasible {
        /// Remaining time budget when the construction got stuck.
        tau: i64,
        /// Jobs that could not be placed.
        unplaced: Vec<String>,
    },

    /// An LCL cost function returned NaN.
    #[error("cost function returned NaN for job '{job_id}' at completion time {completion}")]
    UndefinedCost {
        /// Offending job.
        job_id: String,
        /// Completion time the cost was evaluated at.
        completion: i64,
    },

    /// The WDSPT priority index is undefined for a job.
    #[error(
        "priority index undefined for job '{job_id}' (processing time {processing_time}, rate {rate})"
    )]
    NumericDegeneracy {
        /// Offending job.
        job_id: String,
        /// Its processing time.
        processing_time: i64,
        /// Discount rate in effect.
        rate: f64,
    },
}

impl SequencingError {
    /// Wraps a single validation issue.
    pub fn validation(issue: ValidationIssue) -> Self {
        Self::Validation(vec![issue])
    }

    /// Validation issues carried by this error, empty for other variants.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation(issues) => issues,
            _ => &[],
        }
    }

    /// Whether this error carries an issue of the given kind.
    pub fn has_issue(&self, kind: ValidationErrorKind) -> bool {
        self.issues().iter().any(|i| i.kind == kind)
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Job the issue refers to, if any.
    pub job_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The job set has no jobs.
    EmptyJobSet,
    /// Two jobs share the same id.
    DuplicateId,
    /// A job lacks an attribute the algorithm needs.
    MissingAttribute,
    /// A processing time is below zero.
    NegativeProcessingTime,
    /// A weight is negative, NaN or infinite.
    InvalidWeight,
    /// A successor id does not name a job in the set.
    UnknownSuccessor,
    /// An algorithm parameter is out of range.
    InvalidParameter,
    /// Summed processing times overflow `i64`.
    Overflow,
    /// Input could not be decoded.
    Malformed,
}

impl ValidationIssue {
    /// Creates an issue not tied to a particular job.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            job_id: None,
            message: message.into(),
        }
    }

    /// Creates an issue for a specific job.
    pub fn for_job(
        kind: ValidationErrorKind,
        job_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            job_id: Some(job_id.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects issues and converts them into a result.
pub(crate) fn into_result(issues: Vec<ValidationIssue>) -> SequencingResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(SequencingError::Validation(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_issues() {
        let err = SequencingError::Validation(vec![
            ValidationIssue::for_job(ValidationErrorKind::MissingAttribute, "J1", "J1 lacks duedate"),
            ValidationIssue::new(ValidationErrorKind::EmptyJobSet, "no jobs"),
        ]);
        assert_eq!(err.to_string(), "invalid job data: J1 lacks duedate; no jobs");
        assert!(err.has_issue(ValidationErrorKind::EmptyJobSet));
        assert!(!err.has_issue(ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_graph_message() {
        let err = SequencingError::Graph {
            cycle: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "precedence graph contains a cycle: A -> B -> A");
        assert!(err.issues().is_empty());
    }

    #[test]
    fn test_into_result() {
        assert!(into_result(Vec::new()).is_ok());
        let err = into_result(vec![ValidationIssue::new(ValidationErrorKind::Overflow, "x")])
            .unwrap_err();
        assert!(err.has_issue(ValidationErrorKind::Overflow));
    }
}
