//! Employee record model
//!
//! One `Employee` is one data row of the worksheet. Field order is the
//! sheet's fixed column order A–N; the identifier in column A is the
//! natural key.

use chrono::NaiveDate;
use macros::SheetRow;
use serde::{Deserialize, Serialize};

use crate::models::types::Gender;
use crate::schema::date_utils::{self, DateFormatConfig};

/// A civil servant as stored in the roster sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, SheetRow)]
#[sheet(name = "pegawai")]
pub struct Employee {
    /// Employee identifier (column A, natural key)
    #[column(name = "ID PEGAWAI", key)]
    pub identifier: String,
    #[column(name = "NAMA")]
    pub name: String,
    /// Rank code (golongan)
    #[column(name = "GDP")]
    pub rank_code: String,
    /// Academic suffix title
    #[column(name = "GELAR BELAKANG")]
    pub suffix_title: String,
    /// Free-text position title; drives every derived attribute
    #[column(name = "JABATAN")]
    pub job_title: String,
    #[column(name = "JK")]
    pub gender: String,
    #[column(name = "TEMPAT LAHIR")]
    pub birthplace: String,
    /// Birth date as typed in the sheet (day/month/year)
    #[column(name = "TL")]
    pub birth_date: String,
    #[column(name = "KODE OPD")]
    pub unit_code: String,
    #[column(name = "PENDIDIKAN AWAL")]
    pub initial_education: String,
    #[column(name = "PENDIDIKAN AKHIR")]
    pub final_education: String,
    /// Age in whole years; `None` when the cell is blank or not a number
    #[column(name = "USIA")]
    pub age: Option<u32>,
    /// Organisational unit (OPD)
    #[column(name = "OPD")]
    pub unit_name: String,
    #[column(name = "KOMPETENSI")]
    pub competency: String,
}

impl Employee {
    /// Parsed gender
    #[must_use]
    pub fn gender(&self) -> Gender {
        Gender::from(self.gender.as_str())
    }

    /// Birth date, if the stored text parses
    #[must_use]
    pub fn parsed_birth_date(&self, config: &DateFormatConfig) -> Option<NaiveDate> {
        date_utils::parse_date_string(&self.birth_date, config)
    }

    /// Age on `on`, derived from the birth date
    #[must_use]
    pub fn age_from_birth_date(&self, on: NaiveDate, config: &DateFormatConfig) -> Option<u32> {
        self.parsed_birth_date(config)
            .and_then(|birth| date_utils::age_on(birth, on))
    }

    /// Final education normalised for grouping (trimmed, upper case)
    #[must_use]
    pub fn normalized_final_education(&self) -> String {
        self.final_education.trim().to_uppercase()
    }

    /// Copy of the record as an edit form shows it
    ///
    /// The birth date is rewritten in sheet format; an unparseable date is
    /// replaced by `today`. The result only reaches the sheet if the
    /// operator submits it.
    #[must_use]
    pub fn prefill_for_edit(&self, today: NaiveDate, config: &DateFormatConfig) -> Self {
        let birth_date = self.parsed_birth_date(config).unwrap_or_else(|| {
            log::warn!(
                "Birth date '{}' of employee {} is not a date; pre-filling with {today}",
                self.birth_date,
                self.identifier
            );
            today
        });
        Self {
            birth_date: date_utils::format_sheet_date(birth_date, config),
            ..self.clone()
        }
    }

    /// Selection label used by the delete screen ("ID - NAME")
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.identifier, self.name)
    }
}
