#![allow(dead_code)]

use std::path::PathBuf;

use roster::Employee;
use tempfile::TempDir;

/// An employee with the fields the analytics look at
#[must_use]
pub fn employee(id: &str, title: &str, age: Option<u32>, unit: &str) -> Employee {
    Employee {
        identifier: id.to_string(),
        name: format!("PEGAWAI {id}"),
        job_title: title.to_string(),
        gender: "LAKI-LAKI".to_string(),
        age,
        unit_name: unit.to_string(),
        competency: "UMUM".to_string(),
        final_education: "SARJANA (S1)".to_string(),
        ..Employee::default()
    }
}

/// A fully filled employee record
#[must_use]
pub fn full_employee(id: &str) -> Employee {
    Employee {
        identifier: id.to_string(),
        name: "SITI AMINAH".to_string(),
        rank_code: "III/c".to_string(),
        suffix_title: "S.Kep".to_string(),
        job_title: "PERAWAT AHLI MUDA".to_string(),
        gender: "PEREMPUAN".to_string(),
        birthplace: "KENDARI".to_string(),
        birth_date: "15/01/1985".to_string(),
        unit_code: "1.02".to_string(),
        initial_education: "DIPLOMA III".to_string(),
        final_education: "SARJANA (S1)".to_string(),
        age: Some(40),
        unit_name: "DINAS KESEHATAN".to_string(),
        competency: "KEPERAWATAN".to_string(),
    }
}

/// Nine employees in three well separated retirement horizons
#[must_use]
pub fn sample_roster() -> Vec<Employee> {
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

/// A temporary directory and a worksheet path inside it
pub fn temp_sheet(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(file_name);
    (dir, path)
}
