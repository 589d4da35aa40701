//! Landing dashboard

use serde::{Deserialize, Serialize};

use crate::algorithm::statistics::{
    age_distribution, dashboard_summary, education_by_gender, headcount_by_unit,
};
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::views::{View, rows_to_batch};

#[derive(Serialize, Deserialize)]
struct Metric {
    metric: String,
    value: u64,
}

#[derive(Serialize, Deserialize)]
struct AgeBandRow {
    age_band: String,
    employees: u64,
}

#[derive(Serialize, Deserialize)]
struct EducationRow {
    gender: String,
    final_education: String,
    employees: u64,
}

#[derive(Serialize, Deserialize)]
struct UnitRow {
    unit: String,
    employees: u64,
}

/// Headline metrics, age distribution, education by gender and unit headcount
pub fn dashboard(snapshot: &Snapshot) -> Result<Vec<View>> {
    let employees = snapshot.employees();
    let summary = dashboard_summary(employees);

    let metrics = [
        ("Employees", summary.total_employees),
        ("Units", summary.unit_count),
        ("Male", summary.male_count),
        ("Female", summary.female_count),
    ]
    .into_iter()
    .map(|(metric, value)| Metric {
        metric: metric.to_string(),
        value: value as u64,
    })
    .collect::<Vec<_>>();

    let ages = age_distribution(employees)
        .into_iter()
        .map(|(band, count)| AgeBandRow {
            age_band: band.to_string(),
            employees: count as u64,
        })
        .collect::<Vec<_>>();

    let education = education_by_gender(employees)
        .into_iter()
        .map(|row| EducationRow {
            gender: row.gender,
            final_education: row.final_education,
            employees: row.count as u64,
        })
        .collect::<Vec<_>>();

    let units = headcount_by_unit(employees)
        .into_iter()
        .map(|(unit, count)| UnitRow {
            unit,
            employees: count as u64,
        })
        .collect::<Vec<_>>();

    Ok(vec![
        View::new("Summary", rows_to_batch(&metrics)?),
        View::new("Age distribution", rows_to_batch(&ages)?),
        View::new("Final education by gender", rows_to_batch(&education)?),
        View::new("Employees per unit", rows_to_batch(&units)?),
    ])
}
