//! Input validation for sequencing problems.
//!
//! Checks structural integrity of jobs before any solver runs. Detects:
//! - Empty job sets and duplicate IDs
//! - Negative processing times, invalid weights, sum overflow
//! - Missing per-algorithm attributes
//! - Unknown successor references
//! - Circular precedence (DFS, used to name the cycle when LCL gets stuck)
//!
//! Every check collects all findings instead of stopping at the first.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::error::{ValidationErrorKind, ValidationIssue};
use crate::models::{Attribute, Job, JobSet};

/// Structural checks applied to every job set.
///
/// Checks:
/// 1. At least one job
/// 2. No duplicate job IDs
/// 3. Processing times, when present, are non-negative
/// 4. Weights, when present, are finite and non-negative
/// 5. The sum of processing times fits in `i64`
pub fn validate_jobs(jobs: &[Job]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if jobs.is_empty() {
        issues.push(ValidationIssue::new(
            ValidationErrorKind::EmptyJobSet,
            "job set must contain at least one job",
        ));
        return issues;
    }

    let mut ids = HashSet::new();
    let mut total: Option<i64> = Some(0);

    for job in jobs {
        if !ids.insert(job.id.as_str()) {
            issues.push(ValidationIssue::for_job(
                ValidationErrorKind::DuplicateId,
                &job.id,
                format!("duplicate job ID: {}", job.id),
            ));
        }

        if let Some(p) = job.processing_time {
            if p < 0 {
                issues.push(ValidationIssue::for_job(
                    ValidationErrorKind::NegativeProcessingTime,
                    &job.id,
                    format!("job '{}' has negative processing time {p}", job.id),
                ));
            }
            total = total.and_then(|t| t.checked_add(p));
        }

        if let Some(w) = job.weight {
            if !w.is_finite() || w < 0.0 {
                issues.push(ValidationIssue::for_job(
                    ValidationErrorKind::InvalidWeight,
                    &job.id,
                    format!("job '{}' has invalid weight {w}", job.id),
                ));
            }
        }
    }

    if total.is_none() {
        issues.push(ValidationIssue::new(
            ValidationErrorKind::Overflow,
            "total processing time overflows",
        ));
    }

    issues
}

/// Reports each `(job, attribute)` pair that is missing.
pub fn check_attributes(jobs: &[Job], attributes: &[Attribute]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for job in jobs {
        for &attr in attributes {
            if !job.has(attr) {
                issues.push(ValidationIssue::for_job(
                    ValidationErrorKind::MissingAttribute,
                    &job.id,
                    format!("job '{}' is missing '{attr}'", job.id),
                ));
            }
        }
    }
    issues
}

/// Reports successor ids that do not name a job.
pub fn check_successors(jobs: &[Job], index: &HashMap<String, usize>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for job in jobs {
        for succ in &job.successors {
            if !index.contains_key(succ) {
                issues.push(ValidationIssue::for_job(
                    ValidationErrorKind::UnknownSuccessor,
                    &job.id,
                    format!("job '{}' references unknown successor '{succ}'", job.id),
                ));
            }
        }
    }
    issues
}

/// Finds a precedence cycle among the given jobs, if one exists.
///
/// Only edges between jobs in `within` are followed. The returned path
/// starts and ends with the same id.
///
/// # Algorithm
/// DFS with an explicit recursion stack. A back-edge to a node on the
/// stack closes a cycle; the stack suffix from that node is the cycle.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
pub fn find_cycle(jobs: &JobSet, within: &[usize]) -> Option<Vec<String>> {
    let members: HashSet<usize> = within.iter().copied().collect();
    let adj: HashMap<usize, Vec<usize>> = within
        .iter()
        .map(|&i| {
            let succs = jobs
                .job(i)
                .successors
                .iter()
                .filter_map(|s| jobs.index_of(s))
                .filter(|s| members.contains(s))
                .collect();
            (i, succs)
        })
        .collect();

    let mut visited = HashSet::new();
    let mut stack = Vec::new();

    for &node in within {
        if !visited.contains(&node) {
            if let Some(cycle) = cycle_dfs(node, &adj, &mut visited, &mut stack) {
                return Some(
                    cycle
                        .into_iter()
                        .map(|i| jobs.job(i).id.clone())
                        .collect(),
                );
            }
        }
    }

    None
}

fn cycle_dfs(
    node: usize,
    adj: &HashMap<usize, Vec<usize>>,
    visited: &mut HashSet<usize>,
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    visited.insert(node);
    stack.push(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if let Some(pos) = stack.iter().position(|&s| s == next) {
                // Back edge
                let mut cycle = stack[pos..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            if !visited.contains(&next) {
                if let Some(cycle) = cycle_dfs(next, adj, visited, stack) {
                    return Some(cycle);
                }
            }
        }
    }

    stack.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[&str], close: bool) -> JobSet {
        let mut jobs: Vec<Job> = ids
            .iter()
            .map(|id| Job::new(*id).with_processing_time(1))
            .collect();
        for i in 0..ids.len() - 1 {
            jobs[i].successors.push(ids[i + 1].to_string());
        }
        if close {
            let last = ids.len() - 1;
            jobs[last].successors.push(ids[0].to_string());
        }
        JobSet::new(jobs).unwrap()
    }

    #[test]
    fn test_valid_jobs() {
        let jobs = vec![
            Job::new("A").with_processing_time(0).with_weight(1.0),
            Job::new("B").with_processing_time(3),
        ];
        assert!(validate_jobs(&jobs).is_empty());
    }

    #[test]
    fn test_empty() {
        let issues = validate_jobs(&[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ValidationErrorKind::EmptyJobSet);
    }

    #[test]
    fn test_negative_processing_time() {
        let issues = validate_jobs(&[Job::new("A").with_processing_time(-1)]);
        assert!(issues
            .iter()
            .any(|i| i.kind == ValidationErrorKind::NegativeProcessingTime));
    }

    #[test]
    fn test_invalid_weights() {
        let issues = validate_jobs(&[
            Job::new("A").with_weight(-0.5),
            Job::new("B").with_weight(f64::NAN),
            Job::new("C").with_weight(f64::INFINITY),
        ]);
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.kind == ValidationErrorKind::InvalidWeight)
                .count(),
            3
        );
    }

    #[test]
    fn test_overflow() {
        let issues = validate_jobs(&[
            Job::new("A").with_processing_time(i64::MAX),
            Job::new("B").with_processing_time(1),
        ]);
        assert!(issues.iter().any(|i| i.kind == ValidationErrorKind::Overflow));
    }

    #[test]
    fn test_multiple_errors() {
        let issues = validate_jobs(&[
            Job::new("A").with_processing_time(-2),
            Job::new("A").with_weight(-1.0),
        ]);
        assert!(issues.len() >= 3);
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let set = chain(&["A", "B", "C"], false);
        assert!(find_cycle(&set, &[0, 1, 2]).is_none());
    }

    #[test]
    fn test_cycle_found() {
        // A → B → C → A
        let set = chain(&["A", "B", "C"], true);
        let cycle = find_cycle(&set, &[0, 1, 2]).unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
    }

    #[test]
    fn test_cycle_outside_subset_ignored() {
        let set = chain(&["A", "B", "C"], true);
        // Dropping C breaks the loop
        assert!(find_cycle(&set, &[0, 1]).is_none());
    }

    #[test]
    fn test_self_loop() {
        let set = JobSet::new(vec![Job::new("A").with_processing_time(1).with_successor("A")])
            .unwrap();
        assert_eq!(
            find_cycle(&set, &[0]).unwrap(),
            vec!["A".to_string(), "A".to_string()]
        );
    }
}
