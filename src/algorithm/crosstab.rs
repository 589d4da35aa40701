//! Two-way tables for the heatmap screens

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// A labelled grid of optional values
///
/// Rows and columns follow the natural order of the keys the table was
/// built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `cells[row][column]`; `None` where no observation fell
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CrossTab {
    /// Mean of the values observed in every (row, column) cell
    pub fn mean_by<R, C>(observations: impl IntoIterator<Item = (R, C, f64)>) -> Self
    where
        R: Ord + Display,
        C: Ord + Display,
    {
        let mut sums: BTreeMap<(R, C), (f64, usize)> = BTreeMap::new();
        for (row, column, value) in observations {
            let cell = sums.entry((row, column)).or_insert((0.0, 0));
            cell.0 += value;
            cell.1 += 1;
        }
        Self::build(
            sums.into_iter()
                .map(|(key, (sum, count))| (key, sum / count as f64)),
            None,
        )
    }

    /// Number of observations in every (row, column) cell; empty cells are 0
    pub fn count_by<R, C>(observations: impl IntoIterator<Item = (R, C)>) -> Self
    where
        R: Ord + Display,
        C: Ord + Display,
    {
        let mut counts: BTreeMap<(R, C), usize> = BTreeMap::new();
        for key in observations {
            *counts.entry(key).or_default() += 1;
        }
        Self::build(
            counts.into_iter().map(|(key, count)| (key, count as f64)),
            Some(0.0),
        )
    }

    fn build<R, C>(values: impl Iterator<Item = ((R, C), f64)>, fill: Option<f64>) -> Self
    where
        R: Ord + Display,
        C: Ord + Display,
    {
        let values: Vec<((R, C), f64)> = values.collect();
        let rows: BTreeSet<&R> = values.iter().map(|((row, _), _)| row).collect();
        let columns: BTreeSet<&C> = values.iter().map(|((_, column), _)| column).collect();
        let row_index: BTreeMap<&R, usize> = rows.iter().enumerate().map(|(i, r)| (*r, i)).collect();
        let column_index: BTreeMap<&C, usize> =
            columns.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        let mut cells = vec![vec![fill; columns.len()]; rows.len()];
        for ((row, column), value) in &values {
            cells[row_index[row]][column_index[column]] = Some(*value);
        }

        Self {
            row_labels: rows.iter().map(ToString::to_string).collect(),
            column_labels: columns.iter().map(ToString::to_string).collect(),
            cells,
        }
    }

    /// Value at the labelled cell
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|label| label == row)?;
        let c = self.column_labels.iter().position(|label| label == column)?;
        self.cells[r][c]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_by_leaves_unobserved_cells_empty() {
        let table = CrossTab::mean_by([
            ("DINKES", 1, 40.0),
            ("DINKES", 1, 50.0),
            ("BAPPEDA", 2, 30.0),
        ]);
        assert_eq!(table.row_labels, vec!["BAPPEDA", "DINKES"]);
        assert_eq!(table.column_labels, vec!["1", "2"]);
        assert_eq!(table.get("DINKES", "1"), Some(45.0));
        assert_eq!(table.get("DINKES", "2"), None);
        assert_eq!(table.get("BAPPEDA", "2"), Some(30.0));
    }

    #[test]
    fn test_count_by_fills_zero() {
        let table = CrossTab::count_by([("A", "S1"), ("A", "S1"), ("B", "S2")]);
        assert_eq!(table.get("A", "S1"), Some(2.0));
        assert_eq!(table.get("A", "S2"), Some(0.0));
        assert_eq!(table.get("B", "S2"), Some(1.0));
        assert_eq!(table.get("C", "S2"), None);
    }

    #[test]
    fn test_empty_input() {
        let table = CrossTab::count_by(std::iter::empty::<(String, String)>());
        assert!(table.is_empty());
        assert!(table.cells.is_empty());
    }
}
