//! Employee list and edit form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Employee;
use crate::schema::{DateFormatConfig, SheetRow};
use crate::snapshot::Snapshot;
use crate::store::Worksheet;
use crate::views::{View, rows_to_batch};

/// The raw roster, laid out like the sheet
pub fn employee_list(snapshot: &Snapshot) -> Result<View> {
    let mut sheet = Worksheet::for_records::<Employee>();
    for employee in snapshot.employees() {
        sheet.append_record(employee);
    }
    Ok(View::new(
        format!("Employees ({})", snapshot.len()),
        sheet.to_record_batch()?,
    ))
}

#[derive(Serialize, Deserialize)]
struct FormField {
    column: String,
    value: String,
}

/// Column/value pairs an edit form starts from
///
/// The birth date is shown in sheet format; an unparseable date shows
/// `today`.
pub fn edit_form(employee: &Employee, today: NaiveDate, config: &DateFormatConfig) -> Result<View> {
    let form = employee.prefill_for_edit(today, config);
    let rows: Vec<FormField> = Employee::COLUMNS
        .iter()
        .zip(form.to_cells())
        .map(|(column, value)| FormField {
            column: (*column).to_string(),
            value,
        })
        .collect();
    Ok(View::new(format!("Edit {}", employee.label()), rows_to_batch(&rows)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_list_uses_sheet_header() {
        let snapshot = Snapshot::from_employees(vec![Employee {
            identifier: "7".to_string(),
            name: "DEWI".to_string(),
            age: Some(33),
            ..Employee::default()
        }]);
        let view = employee_list(&snapshot).unwrap();
        assert_eq!(view.title, "Employees (1)");
        assert_eq!(view.num_rows(), 1);
        assert_eq!(view.batch.schema().field(0).name(), "ID PEGAWAI");
        assert_eq!(view.batch.schema().field(11).name(), "USIA");
    }

    #[test]
    fn test_edit_form_prefills_bad_date() {
        let employee = Employee {
            identifier: "7".to_string(),
            name: "DEWI".to_string(),
            birth_date: "-".to_string(),
            ..Employee::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let view = edit_form(&employee, today, &DateFormatConfig::default()).unwrap();
        assert_eq!(view.title, "Edit 7 - DEWI");
        assert_eq!(view.num_rows(), 14);
        let json = crate::views::batch_to_json(&view.batch).unwrap();
        assert_eq!(json[7]["column"], "TL");
        assert_eq!(json[7]["value"], "01/03/2025");
    }
}
