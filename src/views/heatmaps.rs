//! Heatmap screens
//!
//! Cross tables become one text column of row labels followed by one
//! nullable float column per column label.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::algorithm::statistics::{
    headcount_by_unit_and_education, mean_age_by_education_and_level,
    mean_age_by_unit_and_age_band,
};
use crate::algorithm::{ClassifiedRoster, CrossTab};
use crate::error::Result;
use crate::models::Employee;
use crate::views::View;

/// Encode a cross table; `row_header` names the label column
pub fn crosstab_batch(table: &CrossTab, row_header: &str) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(table.column_labels.len() + 1);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(table.column_labels.len() + 1);

    fields.push(Field::new(row_header, DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from_iter_values(&table.row_labels)));

    for (idx, label) in table.column_labels.iter().enumerate() {
        fields.push(Field::new(label, DataType::Float64, true));
        columns.push(Arc::new(
            table
                .cells
                .iter()
                .map(|row| row[idx])
                .collect::<Float64Array>(),
        ));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// The three heatmaps of the workforce screen
pub fn heatmaps(roster: &ClassifiedRoster<'_>, employees: &[Employee]) -> Result<Vec<View>> {
    let by_level = mean_age_by_education_and_level(roster.employees());
    let by_band = mean_age_by_unit_and_age_band(employees);
    let by_education = headcount_by_unit_and_education(employees);

    Ok(vec![
        View::new(
            "Mean age by final education and seniority level",
            crosstab_batch(&by_level, "final_education")?,
        ),
        View::new(
            "Mean age by unit and age band",
            crosstab_batch(&by_band, "unit")?,
        ),
        View::new(
            "Employees by unit and final education",
            crosstab_batch(&by_education, "unit")?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn test_crosstab_batch_layout() {
        let table = CrossTab::mean_by([("A", "x", 1.0), ("B", "y", 2.0)]);
        let batch = crosstab_batch(&table, "unit").unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);
        assert_eq!(batch.schema().field(0).name(), "unit");
        let x = batch
            .column(1)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!((x.value(0) - 1.0).abs() < f64::EPSILON);
        assert!(x.is_null(1));
    }
}
