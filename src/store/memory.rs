//! Worksheet held in memory

use crate::error::Result;
use crate::models::Employee;
use crate::store::{EmployeeStore, Worksheet};

/// Employee store over an in-memory worksheet
#[derive(Debug, Clone)]
pub struct MemoryStore {
    sheet: Worksheet,
}

impl MemoryStore {
    /// Empty sheet with the employee header
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheet: Worksheet::for_records::<Employee>(),
        }
    }

    /// Store seeded with employees, in order
    #[must_use]
    pub fn with_employees<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Self {
        let mut sheet = Worksheet::for_records::<Employee>();
        for employee in employees {
            sheet.append_record(employee);
        }
        Self { sheet }
    }

    /// The underlying worksheet
    #[must_use]
    pub fn worksheet(&self) -> &Worksheet {
        &self.sheet
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeStore for MemoryStore {
    fn list_employees(&mut self) -> Result<Vec<Employee>> {
        Ok(self.sheet.records())
    }

    fn append_employee(&mut self, employee: &Employee) -> Result<bool> {
        self.sheet.append_record(employee);
        Ok(true)
    }

    fn update_employee(&mut self, identifier: &str, employee: &Employee) -> Result<bool> {
        Ok(self.sheet.update_record(identifier, employee))
    }

    fn delete_employee(&mut self, identifier: &str) -> Result<bool> {
        Ok(self.sheet.delete_record::<Employee>(identifier))
    }
}
