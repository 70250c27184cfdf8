//! Validated job collection.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use super::{Attribute, Job};
use crate::error::{
    into_result, SequencingError, SequencingResult, ValidationErrorKind, ValidationIssue,
};
use crate::validation;

/// A non-empty set of jobs with unique ids.
///
/// Input order is preserved and is the tie-breaker for every solver.
/// Structural checks (ids, signs, overflow) run at construction;
/// per-algorithm attribute checks run through [`JobSet::require`].
#[derive(Debug, Clone, PartialEq)]
pub struct JobSet {
    jobs: Vec<Job>,
    index: HashMap<String, usize>,
}

impl JobSet {
    /// Builds a job set, reporting every structural problem at once.
    pub fn new(jobs: Vec<Job>) -> SequencingResult<Self> {
        into_result(validation::validate_jobs(&jobs))?;
        let index = jobs
            .iter()
            .enumerate()
            .map(|(i, j)| (j.id.clone(), i))
            .collect();
        Ok(Self { jobs, index })
    }

    /// Parses a JSON object mapping job id to attributes.
    ///
    /// Keys keep document order. A key repeated in the document is
    /// reported as [`ValidationErrorKind::DuplicateId`].
    ///
    /// ```
    /// use u_sequence::models::JobSet;
    ///
    /// let jobs = JobSet::from_json(r#"{
    ///     "Job1": {"processingtime": 5, "duedate": 10},
    ///     "Job2": {"processingtime": 4, "duedate": 8}
    /// }"#).unwrap();
    /// assert_eq!(jobs.ids(), vec!["Job1", "Job2"]);
    /// ```
    pub fn from_json(json: &str) -> SequencingResult<Self> {
        let JobEntries(entries) = serde_json::from_str::<JobEntries>(json).map_err(|e| {
            SequencingError::validation(ValidationIssue::new(
                ValidationErrorKind::Malformed,
                format!("job data must be a JSON object: {e}"),
            ))
        })?;

        let mut jobs = Vec::with_capacity(entries.len());
        let mut issues = Vec::new();
        for (id, attrs) in entries {
            match serde_json::from_value::<Job>(attrs) {
                Ok(mut job) => {
                    job.id = id;
                    jobs.push(job);
                }
                Err(e) => issues.push(ValidationIssue::for_job(
                    ValidationErrorKind::Malformed,
                    id.clone(),
                    format!("job '{id}': {e}"),
                )),
            }
        }
        into_result(issues)?;
        Self::new(jobs)
    }

    /// Checks that every job carries the given attributes.
    pub fn require(&self, attributes: &[Attribute]) -> SequencingResult<()> {
        into_result(validation::check_attributes(&self.jobs, attributes))
    }

    /// Checks that every successor id names a job in this set.
    pub fn require_known_successors(&self) -> SequencingResult<()> {
        into_result(validation::check_successors(&self.jobs, &self.index))
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false; a job set is never empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Iterates jobs in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Job at an input position.
    #[inline]
    pub fn job(&self, idx: usize) -> &Job {
        &self.jobs[idx]
    }

    /// Finds a job by id.
    pub fn get(&self, id: &str) -> Option<&Job> {
        self.index.get(id).map(|&i| &self.jobs[i])
    }

    /// Input position of a job id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Job ids in input order.
    pub fn ids(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.id.as_str()).collect()
    }

    /// Sum of all processing times.
    pub fn total_processing_time(&self) -> i64 {
        self.jobs.iter().map(Job::p).sum()
    }

    /// Returns a copy of this set with jobs listed in `order`.
    ///
    /// `order` must be a permutation of this set's ids.
    pub fn reordered<S: AsRef<str>>(&self, order: &[S]) -> SequencingResult<Self> {
        let mut jobs = Vec::with_capacity(order.len());
        for id in order {
            let id = id.as_ref();
            match self.get(id) {
                Some(job) => jobs.push(job.clone()),
                None => {
                    return Err(SequencingError::validation(ValidationIssue::for_job(
                        ValidationErrorKind::Malformed,
                        id,
                        format!("unknown job id '{id}' in reorder list"),
                    )))
                }
            }
        }
        if jobs.len() != self.jobs.len() {
            return Err(SequencingError::validation(ValidationIssue::new(
                ValidationErrorKind::Malformed,
                format!(
                    "reorder list has {} ids, expected {}",
                    jobs.len(),
                    self.jobs.len()
                ),
            )));
        }
        Self::new(jobs)
    }
}

/// Top-level JSON entries in document order, repeated keys included.
struct JobEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for JobEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = JobEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping job id to attributes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JobEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(JobEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'a> IntoIterator for &'a JobSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
