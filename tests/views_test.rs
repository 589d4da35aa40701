mod utils;

use std::fs;

use roster::algorithm::succession;
use roster::config::{ClusteringConfig, SuccessionConfig};
use roster::export::export_view;
use roster::store::{EmployeeStore, SheetFileStore};
use roster::views::{self, OutputFormat};
use roster::{ReadinessBand, Snapshot};
use utils::{employee, sample_roster, temp_sheet};

#[test]
fn test_dashboard_json() -> roster::Result<()> {
    let snapshot = Snapshot::from_employees(sample_roster());
    let dashboard = views::dashboard::dashboard(&snapshot)?;
    assert_eq!(dashboard.len(), 4);

    let mut out = Vec::new();
    views::render(&dashboard, OutputFormat::Json, &mut out)?;
    let json: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(json["Summary"][0]["metric"], "Employees");
    assert_eq!(json["Summary"][0]["value"], 9);
    assert_eq!(json["Summary"][1]["value"], 3);
    assert_eq!(json["Employees per unit"][0]["unit"], "DINKES");
    assert_eq!(json["Employees per unit"][0]["employees"], 4);
    Ok(())
}

#[test]
fn test_every_screen_renders_as_table() -> roster::Result<()> {
    let snapshot = Snapshot::from_employees(sample_roster());
    let classified = snapshot.classify(&ClusteringConfig::default());
    let analysis = succession::analyze(classified.employees(), &SuccessionConfig::default());

    let mut screens = vec![views::employees::employee_list(&snapshot)?];
    screens.extend(views::dashboard::dashboard(&snapshot)?);
    screens.extend(views::clusters::scatter(&classified)?);
    screens.push(views::clusters::cluster_summary(&classified)?);
    screens.push(views::clusters::cluster_detail(&classified, &ReadinessBand::ORDERED)?);
    screens.extend(views::projection::projection(&analysis, 5)?);
    screens.extend(views::heatmaps::heatmaps(&classified, snapshot.employees())?);

    let mut out = Vec::new();
    views::render(&screens, OutputFormat::Table, &mut out)?;
    let text = String::from_utf8(out).expect("table output is UTF-8");
    for screen in &screens {
        assert!(text.contains(&screen.title), "missing {}", screen.title);
    }
    Ok(())
}

#[test]
fn test_recap_export_to_csv() -> roster::Result<()> {
    let employees = vec![
        employee("1", "PELAKSANA", Some(55), "DINKES"),
        employee("2", "PELAKSANA", Some(30), "DINKES"),
        employee("3", "PENYELIA", Some(57), "BAPPEDA"),
    ];
    let snapshot = Snapshot::from_employees(employees);
    let classified = snapshot.classify(&ClusteringConfig::default());
    let analysis = succession::analyze(classified.employees(), &SuccessionConfig::default());

    let (_dir, path) = temp_sheet("proyeksi_pensiun.csv");
    export_view(&views::projection::recap(&analysis)?, &path)?;

    let text = fs::read_to_string(&path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "job_title,unit_name,competency,final_education,retiring_count,young_count,has_successor"
    );
    assert_eq!(lines[1], "PELAKSANA,DINKES,UMUM,SARJANA (S1),1,1,Yes");
    assert_eq!(lines[2], "PENYELIA,BAPPEDA,UMUM,SARJANA (S1),1,0,No");
    Ok(())
}

#[test]
fn test_roster_export_to_parquet_reopens_as_sheet() -> roster::Result<()> {
    let snapshot = Snapshot::from_employees(sample_roster());
    let (_dir, path) = temp_sheet("data_pegawai.parquet");
    export_view(&views::employees::employee_list(&snapshot)?, &path)?;

    let mut store = SheetFileStore::open(&path)?;
    assert_eq!(store.list_employees()?, sample_roster());
    Ok(())
}
