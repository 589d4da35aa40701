//! Point-in-time copy of the roster
//!
//! Screens read from a `Snapshot` instead of the store. After a mutation
//! the caller reloads explicitly.

use chrono::{DateTime, Local, NaiveDate};

use crate::algorithm::ClassifiedRoster;
use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::models::Employee;
use crate::store::EmployeeStore;

/// Employees as listed by the store at `loaded_at`
#[derive(Debug, Clone)]
pub struct Snapshot {
    employees: Vec<Employee>,
    loaded_at: DateTime<Local>,
}

impl Snapshot {
    /// List every employee from `store`
    pub fn load<S: EmployeeStore + ?Sized>(store: &mut S) -> Result<Self> {
        let employees = store.list_employees()?;
        log::debug!("Snapshot holds {} employees", employees.len());
        Ok(Self {
            employees,
            loaded_at: Local::now(),
        })
    }

    /// Snapshot of already loaded employees
    #[must_use]
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            loaded_at: Local::now(),
        }
    }

    /// Replace the content with a fresh listing
    ///
    /// On error the previous content is kept.
    pub fn reload<S: EmployeeStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        *self = Self::load(store)?;
        Ok(())
    }

    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Calendar date of the snapshot
    #[must_use]
    pub fn as_of(&self) -> NaiveDate {
        self.loaded_at.date_naive()
    }

    /// First employee with the identifier
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.identifier == identifier)
    }

    /// Derived attributes and readiness bands for the snapshot
    #[must_use]
    pub fn classify(&self, config: &ClusteringConfig) -> ClassifiedRoster<'_> {
        ClassifiedRoster::classify(&self.employees, config)
    }
}
