//! Cluster scatter, summary and detail screens

use serde::{Deserialize, Serialize};

use crate::algorithm::features::{SENIORITY_LEGEND, seniority_tier};
use crate::algorithm::{ClassifiedEmployee, ClassifiedRoster};
use crate::error::Result;
use crate::models::ReadinessBand;
use crate::views::{View, rows_to_batch};

#[derive(Serialize, Deserialize)]
struct PointRow {
    identifier: String,
    name: String,
    remaining_service_years: Option<i32>,
    seniority_level: f64,
    tier: Option<String>,
    readiness_band: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct CentroidRow {
    readiness_band: String,
    remaining_service_years: f64,
    seniority_level: f64,
}

#[derive(Serialize, Deserialize)]
struct LegendRow {
    seniority_level: f64,
    tier: String,
}

#[derive(Serialize, Deserialize)]
struct SummaryRow {
    readiness_band: String,
    employees: u64,
    mean_remaining_years: Option<f64>,
    mean_seniority_level: f64,
    units: u64,
}

/// One row per employee of a band detail list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub name: String,
    pub job_title: String,
    pub unit_name: String,
    pub age: Option<u32>,
    pub remaining_service_years: Option<i32>,
    pub seniority_level: f64,
    pub readiness_band: Option<String>,
}

impl DetailRow {
    #[must_use]
    pub fn from_classified(employee: &ClassifiedEmployee<'_>) -> Self {
        Self {
            name: employee.employee.name.clone(),
            job_title: employee.employee.job_title.clone(),
            unit_name: employee.employee.unit_name.clone(),
            age: employee.employee.age,
            remaining_service_years: employee.remaining_service_years,
            seniority_level: employee.seniority_level,
            readiness_band: employee.readiness_band.map(|band| band.to_string()),
        }
    }
}

/// Points, band centroids and the seniority legend
pub fn scatter(roster: &ClassifiedRoster<'_>) -> Result<Vec<View>> {
    let points: Vec<PointRow> = roster
        .employees()
        .iter()
        .filter(|e| e.remaining_service_years.is_some())
        .map(|e| PointRow {
            identifier: e.employee.identifier.clone(),
            name: e.employee.name.clone(),
            remaining_service_years: e.remaining_service_years,
            seniority_level: e.seniority_level,
            tier: seniority_tier(e.seniority_level).map(str::to_string),
            readiness_band: e.readiness_band.map(|band| band.to_string()),
        })
        .collect();

    let centroids: Vec<CentroidRow> = roster
        .band_centroids()
        .into_iter()
        .map(|(band, [years, level])| CentroidRow {
            readiness_band: band.to_string(),
            remaining_service_years: years,
            seniority_level: level,
        })
        .collect();

    let legend: Vec<LegendRow> = SENIORITY_LEGEND
        .iter()
        .map(|(level, tier)| LegendRow {
            seniority_level: *level,
            tier: (*tier).to_string(),
        })
        .collect();

    Ok(vec![
        View::new("Remaining service years vs seniority level", rows_to_batch(&points)?),
        View::new("Centroids", rows_to_batch(&centroids)?),
        View::new("Seniority levels", rows_to_batch(&legend)?),
    ])
}

/// Per-band summary
pub fn cluster_summary(roster: &ClassifiedRoster<'_>) -> Result<View> {
    let rows: Vec<SummaryRow> = roster
        .band_summaries()
        .into_iter()
        .map(|summary| SummaryRow {
            readiness_band: summary.band.to_string(),
            employees: summary.employee_count as u64,
            mean_remaining_years: summary.mean_remaining_years,
            mean_seniority_level: summary.mean_seniority_level,
            units: summary.unit_count as u64,
        })
        .collect();
    Ok(View::new("Cluster summary", rows_to_batch(&rows)?))
}

/// Members of the selected bands, fewest remaining years first
pub fn cluster_detail(roster: &ClassifiedRoster<'_>, bands: &[ReadinessBand]) -> Result<View> {
    let rows: Vec<DetailRow> = roster
        .band_detail(bands)
        .into_iter()
        .map(DetailRow::from_classified)
        .collect();
    let names = bands.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    Ok(View::new(format!("Cluster detail: {names}"), rows_to_batch(&rows)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusteringConfig;
    use crate::models::Employee;

    fn employees() -> Vec<Employee> {
        [
            ("PELAKSANA", 56),
            ("PELAKSANA", 57),
            ("AHLI MUDA", 40),
            ("AHLI MUDA", 41),
            ("PEMULA", 23),
            ("PEMULA", 24),
        ]
        .iter()
        .enumerate()
        .map(|(i, (title, age))| Employee {
            identifier: i.to_string(),
            job_title: (*title).to_string(),
            age: Some(*age),
            unit_name: "DINKES".to_string(),
            ..Employee::default()
        })
        .collect()
    }

    #[test]
    fn test_scatter_views() {
        let employees = employees();
        let roster = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        let views = scatter(&roster).unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].num_rows(), 6);
        assert_eq!(views[1].num_rows(), 3);
        assert_eq!(views[2].num_rows(), SENIORITY_LEGEND.len());

        let points = crate::views::batch_to_json(&views[0].batch).unwrap();
        assert_eq!(points[0]["tier"], "LAINNYA");
        assert_eq!(points[2]["tier"], "AHLI MUDA");
    }

    #[test]
    fn test_summary_and_detail() {
        let employees = employees();
        let roster = ClassifiedRoster::classify(&employees, &ClusteringConfig::default());
        assert_eq!(cluster_summary(&roster).unwrap().num_rows(), 3);

        let detail = cluster_detail(&roster, &[ReadinessBand::RetiringSoon]).unwrap();
        assert_eq!(detail.title, "Cluster detail: Retiring-Soon");
        assert_eq!(detail.num_rows(), 2);
    }
}
