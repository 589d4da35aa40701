//! Succession gap analysis
//!
//! Employees close to retirement are grouped by
//! (job title, unit, competency, final education). Each group is matched
//! against the young employees sharing the same key; a group without any
//! young match is a succession gap.

use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::readiness::ClassifiedEmployee;
use crate::config::SuccessionConfig;

/// Grouping key shared by retiring and young cohorts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuccessionKey<'a> {
    pub job_title: &'a str,
    pub unit_name: &'a str,
    pub competency: &'a str,
    pub final_education: &'a str,
}

impl<'a> SuccessionKey<'a> {
    #[must_use]
    pub fn of(employee: &'a ClassifiedEmployee<'_>) -> Self {
        let record = employee.employee;
        Self {
            job_title: &record.job_title,
            unit_name: &record.unit_name,
            competency: &record.competency,
            final_education: &record.final_education,
        }
    }
}

/// One row of the retirement recap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessionGap {
    pub job_title: String,
    pub unit_name: String,
    pub competency: String,
    pub final_education: String,
    pub retiring_count: usize,
    pub young_count: usize,
}

impl SuccessionGap {
    #[must_use]
    pub fn has_successor(&self) -> bool {
        self.young_count > 0
    }

    /// "Yes" when at least one young employee shares the key, else "No"
    #[must_use]
    pub fn successor_label(&self) -> &'static str {
        if self.has_successor() { "Yes" } else { "No" }
    }
}

/// Retiring cohort and its recap
#[derive(Debug, Clone)]
pub struct SuccessionAnalysis<'r, 'a> {
    /// Employees within the horizon, in roster order
    pub retiring: Vec<&'r ClassifiedEmployee<'a>>,
    /// One row per retiring key, ordered by key
    pub gaps: Vec<SuccessionGap>,
}

impl SuccessionAnalysis<'_, '_> {
    /// Recap rows with no young successor
    pub fn uncovered(&self) -> impl Iterator<Item = &SuccessionGap> {
        self.gaps.iter().filter(|gap| !gap.has_successor())
    }
}

/// Whether the employee retires within `horizon_years`
#[must_use]
pub fn is_retiring(employee: &ClassifiedEmployee<'_>, horizon_years: i32) -> bool {
    employee
        .remaining_service_years
        .is_some_and(|years| years <= horizon_years)
}

/// Whether the employee is strictly younger than `threshold`
#[must_use]
pub fn is_young(employee: &ClassifiedEmployee<'_>, threshold: u32) -> bool {
    employee.employee.age.is_some_and(|age| age < threshold)
}

/// Match retiring cohorts against young cohorts
///
/// Employees with an unknown age are in neither cohort.
#[must_use]
pub fn analyze<'r, 'a>(
    employees: &'r [ClassifiedEmployee<'a>],
    config: &SuccessionConfig,
) -> SuccessionAnalysis<'r, 'a> {
    let retiring: Vec<&ClassifiedEmployee<'a>> = employees
        .iter()
        .filter(|e| is_retiring(e, config.retirement_horizon_years))
        .collect();

    let mut retiring_counts: BTreeMap<SuccessionKey<'_>, usize> = BTreeMap::new();
    for &employee in &retiring {
        *retiring_counts.entry(SuccessionKey::of(employee)).or_default() += 1;
    }

    let young_counts: FxHashMap<SuccessionKey<'_>, usize> = employees
        .iter()
        .filter(|e| is_young(e, config.young_age_threshold))
        .map(SuccessionKey::of)
        .counts()
        .into_iter()
        .collect();

    let gaps = retiring_counts
        .into_iter()
        .map(|(key, retiring_count)| SuccessionGap {
            job_title: key.job_title.to_string(),
            unit_name: key.unit_name.to_string(),
            competency: key.competency.to_string(),
            final_education: key.final_education.to_string(),
            retiring_count,
            young_count: young_counts.get(&key).copied().unwrap_or(0),
        })
        .collect();

    SuccessionAnalysis { retiring, gaps }
}
