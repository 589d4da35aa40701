//! Retirement projection and successor availability

use serde::{Deserialize, Serialize};

use crate::algorithm::{SuccessionAnalysis, SuccessionGap};
use crate::error::Result;
use crate::views::{View, rows_to_batch};

#[derive(Serialize, Deserialize)]
struct RetiringRow {
    name: String,
    job_title: String,
    unit_name: String,
    age: Option<u32>,
    remaining_service_years: Option<i32>,
}

/// One row of the exported recap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapRow {
    pub job_title: String,
    pub unit_name: String,
    pub competency: String,
    pub final_education: String,
    pub retiring_count: u64,
    pub young_count: u64,
    pub has_successor: String,
}

impl From<&SuccessionGap> for RecapRow {
    fn from(gap: &SuccessionGap) -> Self {
        Self {
            job_title: gap.job_title.clone(),
            unit_name: gap.unit_name.clone(),
            competency: gap.competency.clone(),
            final_education: gap.final_education.clone(),
            retiring_count: gap.retiring_count as u64,
            young_count: gap.young_count as u64,
            has_successor: gap.successor_label().to_string(),
        }
    }
}

/// Recap rows of an analysis, in key order
#[must_use]
pub fn recap_rows(analysis: &SuccessionAnalysis<'_, '_>) -> Vec<RecapRow> {
    analysis.gaps.iter().map(RecapRow::from).collect()
}

/// Recap of retiring cohorts and their successor availability
pub fn recap(analysis: &SuccessionAnalysis<'_, '_>) -> Result<View> {
    Ok(View::new(
        "Retirement and successor recap",
        rows_to_batch(&recap_rows(analysis))?,
    ))
}

/// Employees retiring within the horizon, the recap, then the cohorts
/// nobody young can succeed
pub fn projection(analysis: &SuccessionAnalysis<'_, '_>, horizon_years: i32) -> Result<Vec<View>> {
    let retiring: Vec<RetiringRow> = analysis
        .retiring
        .iter()
        .map(|e| RetiringRow {
            name: e.employee.name.clone(),
            job_title: e.employee.job_title.clone(),
            unit_name: e.employee.unit_name.clone(),
            age: e.employee.age,
            remaining_service_years: e.remaining_service_years,
        })
        .collect();

    Ok(vec![
        View::new(
            format!("Retiring within {horizon_years} years"),
            rows_to_batch(&retiring)?,
        ),
        recap(analysis)?,
        View::new(
            "Retiring cohorts without a successor",
            rows_to_batch(&analysis.uncovered().map(RecapRow::from).collect::<Vec<_>>())?,
        ),
    ])
}
