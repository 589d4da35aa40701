//! Workforce statistics for the dashboard and heatmap screens

use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::algorithm::crosstab::CrossTab;
use crate::algorithm::readiness::ClassifiedEmployee;
use crate::models::{AgeBand, Employee, Gender};

/// Headline numbers of the landing dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_employees: usize,
    /// Distinct non-blank organisational units
    pub unit_count: usize,
    pub male_count: usize,
    pub female_count: usize,
}

/// Employees sharing a gender and final education
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationCount {
    pub gender: String,
    pub final_education: String,
    pub count: usize,
}

#[must_use]
pub fn dashboard_summary(employees: &[Employee]) -> DashboardSummary {
    let units: FxHashSet<&str> = employees
        .iter()
        .map(|e| e.unit_name.trim())
        .filter(|unit| !unit.is_empty())
        .collect();
    let genders = employees.iter().map(Employee::gender).counts();

    DashboardSummary {
        total_employees: employees.len(),
        unit_count: units.len(),
        male_count: genders.get(&Gender::Male).copied().unwrap_or(0),
        female_count: genders.get(&Gender::Female).copied().unwrap_or(0),
    }
}

/// Headcount per age band, every band listed
///
/// Employees without an age, or with age 0, fall in no band.
#[must_use]
pub fn age_distribution(employees: &[Employee]) -> Vec<(AgeBand, usize)> {
    let counts = employees
        .iter()
        .filter_map(|e| e.age.and_then(AgeBand::from_age))
        .counts();
    AgeBand::ALL
        .iter()
        .map(|band| (*band, counts.get(band).copied().unwrap_or(0)))
        .collect()
}

/// Headcount per (gender, normalised final education)
#[must_use]
pub fn education_by_gender(employees: &[Employee]) -> Vec<EducationCount> {
    employees
        .iter()
        .map(|e| (e.gender.trim().to_string(), e.normalized_final_education()))
        .counts()
        .into_iter()
        .sorted()
        .map(|((gender, final_education), count)| EducationCount {
            gender,
            final_education,
            count,
        })
        .collect()
}

/// Headcount per unit, largest first, then by name
#[must_use]
pub fn headcount_by_unit(employees: &[Employee]) -> Vec<(String, usize)> {
    employees
        .iter()
        .map(|e| e.unit_name.as_str())
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(unit, count)| (unit.to_string(), count))
        .collect()
}

/// Seniority level as a table key
#[derive(Debug, Clone, Copy)]
struct Level(f64);

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Mean age by normalised final education (rows) and seniority level (columns)
#[must_use]
pub fn mean_age_by_education_and_level(employees: &[ClassifiedEmployee<'_>]) -> CrossTab {
    CrossTab::mean_by(employees.iter().filter_map(|e| {
        let age = e.employee.age?;
        Some((
            e.employee.normalized_final_education(),
            Level(e.seniority_level),
            f64::from(age),
        ))
    }))
}

/// Mean age by unit (rows) and age band (columns)
#[must_use]
pub fn mean_age_by_unit_and_age_band(employees: &[Employee]) -> CrossTab {
    CrossTab::mean_by(employees.iter().filter_map(|e| {
        let age = e.age?;
        Some((e.unit_name.as_str(), AgeBand::from_age(age)?, f64::from(age)))
    }))
}

/// Headcount by unit (rows) and normalised final education (columns)
#[must_use]
pub fn headcount_by_unit_and_education(employees: &[Employee]) -> CrossTab {
    CrossTab::count_by(
        employees
            .iter()
            .map(|e| (e.unit_name.as_str(), e.normalized_final_education())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(unit: &str, gender: &str, education: &str, age: Option<u32>) -> Employee {
        Employee {
            unit_name: unit.to_string(),
            gender: gender.to_string(),
            final_education: education.to_string(),
            age,
            ..Employee::default()
        }
    }

    fn sample() -> Vec<Employee> {
        vec![
            employee("DINKES", "LAKI-LAKI", "Sarjana (S1) ", Some(25)),
            employee("DINKES", "PEREMPUAN", "SARJANA (S1)", Some(26)),
            employee("BAPPEDA", "PEREMPUAN", "DIPLOMA III", Some(61)),
            employee("DISDIK", "LAKI-LAKI", "DIPLOMA III", None),
            employee("DINKES", "LAKI-LAKI", "SARJANA (S1)", Some(0)),
        ]
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = dashboard_summary(&sample());
        assert_eq!(
            summary,
            DashboardSummary {
                total_employees: 5,
                unit_count: 3,
                male_count: 3,
                female_count: 2,
            }
        );
    }

    #[test]
    fn test_age_distribution_bins_are_right_closed() {
        let distribution = age_distribution(&sample());
        assert_eq!(distribution.len(), 9);
        assert_eq!(distribution[0], (AgeBand::UpTo25, 1));
        assert_eq!(distribution[1], (AgeBand::From26To30, 1));
        assert_eq!(distribution[8], (AgeBand::Over60, 1));
        assert_eq!(distribution.iter().map(|(_, n)| n).sum::<usize>(), 3);
    }

    #[test]
    fn test_education_by_gender_normalises_education() {
        let counts = education_by_gender(&sample());
        assert_eq!(
            counts[1],
            EducationCount {
                gender: "LAKI-LAKI".to_string(),
                final_education: "SARJANA (S1)".to_string(),
                count: 2,
            }
        );
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 5);
    }

    #[test]
    fn test_headcount_by_unit_order() {
        let counts = headcount_by_unit(&sample());
        assert_eq!(
            counts,
            vec![
                ("DINKES".to_string(), 3),
                ("BAPPEDA".to_string(), 1),
                ("DISDIK".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_heatmaps() {
        let employees = sample();
        let by_band = mean_age_by_unit_and_age_band(&employees);
        assert_eq!(by_band.get("DINKES", "<25"), Some(25.0));
        assert_eq!(by_band.get("BAPPEDA", ">60"), Some(61.0));
        assert_eq!(by_band.get("DINKES", ">60"), None);

        let by_education = headcount_by_unit_and_education(&employees);
        assert_eq!(by_education.get("DINKES", "SARJANA (S1)"), Some(3.0));
        assert_eq!(by_education.get("DINKES", "DIPLOMA III"), Some(0.0));

        let classified: Vec<ClassifiedEmployee<'_>> =
            employees.iter().map(ClassifiedEmployee::derive).collect();
        let by_level = mean_age_by_education_and_level(&classified);
        assert_eq!(by_level.column_labels, vec!["0.2"]);
        assert_eq!(by_level.get("DIPLOMA III", "0.2"), Some(61.0));
    }
}
