//! Retirement readiness classification
//!
//! Every employee gets the title-derived features. Employees whose remaining
//! service years are known are then clustered on
//! (remaining service years, seniority level), and the clusters are named by
//! ascending mean remaining years: Retiring-Soon, Mid-Term, Long-Horizon.
//! With fewer classifiable employees than bands nobody is clustered and the
//! whole roster is marked Insufficient-Data.

use itertools::Itertools;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::algorithm::features::{classify_title, seniority_score};
use crate::algorithm::kmeans;
use crate::config::ClusteringConfig;
use crate::models::{Employee, JobCategory, ReadinessBand};

/// An employee with derived attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEmployee<'a> {
    pub employee: &'a Employee,
    pub job_category: JobCategory,
    pub retirement_age: u32,
    pub seniority_level: f64,
    /// Retirement age minus age; `None` when the age is unknown
    pub remaining_service_years: Option<i32>,
    /// `None` until clustered, and for employees left out of clustering
    pub readiness_band: Option<ReadinessBand>,
}

impl<'a> ClassifiedEmployee<'a> {
    /// Derive the title features of one employee
    #[must_use]
    pub fn derive(employee: &'a Employee) -> Self {
        let (job_category, retirement_age) = classify_title(&employee.job_title);
        let seniority_level = seniority_score(&employee.job_title);
        Self {
            employee,
            job_category,
            retirement_age,
            seniority_level,
            remaining_service_years: remaining_service_years(retirement_age, employee.age),
            readiness_band: None,
        }
    }

    /// Clustering coordinates, if the employee can be clustered
    #[must_use]
    pub fn features(&self) -> Option<[f64; 2]> {
        self.remaining_service_years
            .map(|years| [f64::from(years), self.seniority_level])
    }
}

/// Retirement age minus age, when the age is known
#[must_use]
pub fn remaining_service_years(retirement_age: u32, age: Option<u32>) -> Option<i32> {
    let age = i64::from(age?);
    i32::try_from(i64::from(retirement_age) - age).ok()
}

/// How the bands of a roster were obtained
#[derive(Debug, Clone, PartialEq)]
pub enum ClusteringOutcome {
    /// No employees at all
    Empty,
    /// Too few classifiable employees; everybody is Insufficient-Data
    InsufficientData { classifiable: usize },
    /// Bands assigned from a k-means fit
    Clustered {
        classifiable: usize,
        inertia: f64,
        restart: usize,
        iterations: usize,
    },
}

/// Per-band aggregate shown on the cluster summary screen
#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    pub band: ReadinessBand,
    pub employee_count: usize,
    /// Mean over members with a known value
    pub mean_remaining_years: Option<f64>,
    pub mean_seniority_level: f64,
    /// Distinct organisational units among the members
    pub unit_count: usize,
}

/// A roster with derived attributes and readiness bands
#[derive(Debug, Clone)]
pub struct ClassifiedRoster<'a> {
    employees: Vec<ClassifiedEmployee<'a>>,
    outcome: ClusteringOutcome,
}

impl<'a> ClassifiedRoster<'a> {
    /// Derive features for every employee and assign readiness bands
    #[must_use]
    pub fn classify(employees: &'a [Employee], config: &ClusteringConfig) -> Self {
        let mut classified: Vec<ClassifiedEmployee<'a>> =
            employees.iter().map(ClassifiedEmployee::derive).collect();

        if classified.is_empty() {
            return Self {
                employees: classified,
                outcome: ClusteringOutcome::Empty,
            };
        }

        let (indices, points): (Vec<usize>, Vec<[f64; 2]>) = classified
            .iter()
            .enumerate()
            .filter_map(|(idx, employee)| employee.features().map(|point| (idx, point)))
            .unzip();
        let classifiable = points.len();

        let Some(clustering) = kmeans::fit(&points, ReadinessBand::ORDERED.len(), config) else {
            info!(
                "Only {classifiable} of {} employees have a known age; skipping clustering",
                classified.len()
            );
            for employee in &mut classified {
                employee.readiness_band = Some(ReadinessBand::InsufficientData);
            }
            return Self {
                employees: classified,
                outcome: ClusteringOutcome::InsufficientData { classifiable },
            };
        };

        let bands = bands_by_mean_remaining(&clustering.labels, &points, clustering.centroids.len());
        for (&idx, &label) in indices.iter().zip(&clustering.labels) {
            classified[idx].readiness_band = bands[label];
        }

        Self {
            employees: classified,
            outcome: ClusteringOutcome::Clustered {
                classifiable,
                inertia: clustering.inertia,
                restart: clustering.restart,
                iterations: clustering.iterations,
            },
        }
    }

    #[must_use]
    pub fn employees(&self) -> &[ClassifiedEmployee<'a>] {
        &self.employees
    }

    #[must_use]
    pub fn outcome(&self) -> &ClusteringOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Bands present in the roster, in display order
    #[must_use]
    pub fn bands(&self) -> Vec<ReadinessBand> {
        self.employees
            .iter()
            .filter_map(|e| e.readiness_band)
            .unique()
            .sorted()
            .collect()
    }

    /// Count, means and distinct units per band
    #[must_use]
    pub fn band_summaries(&self) -> Vec<BandSummary> {
        self.bands()
            .into_iter()
            .map(|band| {
                let members: Vec<&ClassifiedEmployee<'_>> = self.members(band).collect();
                let known: Vec<f64> = members
                    .iter()
                    .filter_map(|e| e.remaining_service_years.map(f64::from))
                    .collect();
                let units: FxHashSet<&str> =
                    members.iter().map(|e| e.employee.unit_name.as_str()).collect();
                BandSummary {
                    band,
                    employee_count: members.len(),
                    mean_remaining_years: mean(&known),
                    mean_seniority_level: mean(
                        &members.iter().map(|e| e.seniority_level).collect::<Vec<_>>(),
                    )
                    .unwrap_or_default(),
                    unit_count: units.len(),
                }
            })
            .collect()
    }

    /// Members of the selected bands, fewest remaining years first
    ///
    /// Employees with unknown remaining years come last.
    #[must_use]
    pub fn band_detail(&self, bands: &[ReadinessBand]) -> Vec<&ClassifiedEmployee<'a>> {
        self.employees
            .iter()
            .filter(|e| e.readiness_band.is_some_and(|band| bands.contains(&band)))
            .sorted_by_key(|e| (e.remaining_service_years.is_none(), e.remaining_service_years))
            .collect()
    }

    /// Mean (remaining years, seniority level) of every clustered band
    #[must_use]
    pub fn band_centroids(&self) -> Vec<(ReadinessBand, [f64; 2])> {
        ReadinessBand::ORDERED
            .iter()
            .filter_map(|&band| {
                let points: Vec<[f64; 2]> =
                    self.members(band).filter_map(ClassifiedEmployee::features).collect();
                let x = mean(&points.iter().map(|p| p[0]).collect::<Vec<_>>())?;
                let y = mean(&points.iter().map(|p| p[1]).collect::<Vec<_>>())?;
                Some((band, [x, y]))
            })
            .collect()
    }

    fn members(&self, band: ReadinessBand) -> impl Iterator<Item = &ClassifiedEmployee<'a>> {
        self.employees
            .iter()
            .filter(move |e| e.readiness_band == Some(band))
    }
}

/// Band of every cluster id, by ascending mean remaining years
///
/// Ties keep the lower cluster id first. Empty clusters get no band, and
/// when fewer clusters are populated than there are bands the bands are
/// handed out from the front.
fn bands_by_mean_remaining(
    labels: &[usize],
    points: &[[f64; 2]],
    clusters: usize,
) -> Vec<Option<ReadinessBand>> {
    let mut sums = vec![0.0; clusters];
    let mut counts = vec![0usize; clusters];
    for (&label, point) in labels.iter().zip(points) {
        sums[label] += point[0];
        counts[label] += 1;
    }

    let order: Vec<(usize, f64)> = (0..clusters)
        .filter(|&id| counts[id] > 0)
        .map(|id| (id, sums[id] / counts[id] as f64))
        .sorted_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .collect();

    let mut bands = vec![None; clusters];
    for ((id, mean_years), band) in order.into_iter().zip(ReadinessBand::ORDERED) {
        debug!("Cluster {id}: mean remaining years {mean_years:.2} -> {band}");
        bands[id] = Some(band);
    }
    bands
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, title: &str, age: Option<u32>, unit: &str) -> Employee {
        Employee {
            identifier: id.to_string(),
            job_title: title.to_string(),
            age,
            unit_name: unit.to_string(),
            ..Employee::default()
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("1", "PELAKSANA", Some(56), "DINKES"),
            employee("2", "PENGELOLA KEUANGAN", Some(57), "DINKES"),
            employee("3", "AHLI MADYA", Some(58), "BAPPEDA"),
            employee("4", "AHLI MUDA", Some(40), "DINKES"),
            employee("5", "AHLI MUDA", Some(42), "BAPPEDA"),
            employee("6", "PENYELIA", Some(41), "DISDIK"),
            employee("7", "AHLI PERTAMA", Some(24), "DISDIK"),
            employee("8", "TERAMPIL", Some(25), "DISDIK"),
            employee("9", "PEMULA", Some(23), "DINKES"),
        ]
    }

    #[test]
    fn test_derive_features() {
        let e = employee("1", "AHLI MUDA TEKNIK", Some(30), "X");
        let c = ClassifiedEmployee::derive(&e);
        assert_eq!(c.job_category, JobCategory::FunctionalExpertise);
        assert_eq!(c.retirement_age, 58);
        assert!((c.seniority_level - 2.0).abs() < f64::EPSILON);
        assert_eq!(c.remaining_service_years, Some(28));
        assert_eq!(c.readiness_band, None);
    }

    #[test]
    fn test_remaining_years_can_be_negative() {
        assert_eq!(remaining_service_years(58, Some(61)), Some(-3));
        assert_eq!(remaining_service_years(58, None), None);
    }

    #[test]
    fn test_bands_follow_mean_remaining_years() {
        let employees = roster();
        let classified = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        assert!(matches!(classified.outcome(), ClusteringOutcome::Clustered { classifiable: 9, .. }));

        let band_of = |id: &str| {
            classified
                .employees()
                .iter()
                .find(|e| e.employee.identifier == id)
                .and_then(|e| e.readiness_band)
        };
        assert_eq!(band_of("1"), Some(ReadinessBand::RetiringSoon));
        assert_eq!(band_of("4"), Some(ReadinessBand::MidTerm));
        assert_eq!(band_of("9"), Some(ReadinessBand::LongHorizon));

        let summaries = classified.band_summaries();
        assert_eq!(summaries.len(), 3);
        let means: Vec<f64> = summaries
            .iter()
            .map(|s| s.mean_remaining_years.unwrap())
            .collect();
        assert!(means[0] <= means[1] && means[1] <= means[2]);
        assert_eq!(summaries.iter().map(|s| s.employee_count).sum::<usize>(), 9);
    }

    #[test]
    fn test_fewer_than_three_is_insufficient_data() {
        let employees = vec![
            employee("1", "PELAKSANA", Some(50), "A"),
            employee("2", "AHLI MUDA", Some(30), "A"),
            employee("3", "AHLI MUDA", None, "B"),
        ];
        let classified = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        assert_eq!(
            classified.outcome(),
            &ClusteringOutcome::InsufficientData { classifiable: 2 }
        );
        assert!(classified
            .employees()
            .iter()
            .all(|e| e.readiness_band == Some(ReadinessBand::InsufficientData)));
        assert!(classified.band_centroids().is_empty());
    }

    #[test]
    fn test_missing_age_gets_no_band() {
        let mut employees = roster();
        employees.push(employee("10", "AHLI MUDA", None, "DINKES"));
        let classified = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        let missing = classified
            .employees()
            .iter()
            .find(|e| e.employee.identifier == "10")
            .unwrap();
        assert_eq!(missing.remaining_service_years, None);
        assert_eq!(missing.readiness_band, None);
    }

    #[test]
    fn test_empty_roster() {
        let classified = ClassifiedRoster::classify(&[], &ClusteringConfig::default());
        assert!(classified.is_empty());
        assert_eq!(classified.outcome(), &ClusteringOutcome::Empty);
        assert!(classified.bands().is_empty());
    }

    #[test]
    fn test_band_detail_sorted_by_remaining_years() {
        let employees = roster();
        let classified = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        let detail = classified.band_detail(&ReadinessBand::ORDERED);
        let years: Vec<i32> = detail
            .iter()
            .filter_map(|e| e.remaining_service_years)
            .collect();
        assert_eq!(years.len(), 9);
        assert!(years.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_identical_employees_share_one_band() {
        let employees: Vec<Employee> = (1..=4)
            .map(|id| employee(&id.to_string(), "PELAKSANA", Some(50), "DINKES"))
            .collect();
        let classified = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());

        assert!(matches!(
            classified.outcome(),
            ClusteringOutcome::Clustered { classifiable: 4, .. }
        ));
        assert!(classified
            .employees()
            .iter()
            .all(|e| e.readiness_band == Some(ReadinessBand::RetiringSoon)));
        assert_eq!(classified.bands(), vec![ReadinessBand::RetiringSoon]);
        let summaries = classified.band_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].employee_count, 4);
        assert_eq!(summaries[0].mean_remaining_years, Some(8.0));
    }

    #[test]
    fn test_ties_between_clusters_keep_lower_id_first() {
        let labels = [0, 1, 2];
        let points = [[10.0, 1.0], [10.0, 2.0], [5.0, 1.0]];
        let bands = bands_by_mean_remaining(&labels, &points, 3);
        assert_eq!(bands[2], Some(ReadinessBand::RetiringSoon));
        assert_eq!(bands[0], Some(ReadinessBand::MidTerm));
        assert_eq!(bands[1], Some(ReadinessBand::LongHorizon));
    }

    #[test]
    fn test_degenerate_clusters_take_bands_from_the_front() {
        let labels = [1, 1, 1];
        let points = [[3.0, 1.0], [3.0, 1.0], [3.0, 1.0]];
        let bands = bands_by_mean_remaining(&labels, &points, 3);
        assert_eq!(bands, vec![None, Some(ReadinessBand::RetiringSoon), None]);
    }
}
