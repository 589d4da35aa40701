//! Record store adapters
//!
//! The roster treats its backing sheet as an external resource: every
//! operation is attempted once, the last writer wins, and a failure of the
//! store itself surfaces as an error with nothing applied. A lookup miss on
//! update or delete is not an error; it is reported as `Ok(false)`.

pub mod file;
pub mod memory;
pub mod worksheet;

use crate::error::{Result, RosterError};
use crate::models::Employee;

pub use file::{SheetFileStore, SheetFormat};
pub use memory::MemoryStore;
pub use worksheet::Worksheet;

/// CRUD access to the employee sheet
pub trait EmployeeStore {
    /// Every employee row in sheet order
    fn list_employees(&mut self) -> Result<Vec<Employee>>;

    /// Append a row at the end of the sheet
    fn append_employee(&mut self, employee: &Employee) -> Result<bool>;

    /// Overwrite columns A–N of the first row whose identifier matches
    fn update_employee(&mut self, identifier: &str, employee: &Employee) -> Result<bool>;

    /// Remove the first row whose identifier matches
    fn delete_employee(&mut self, identifier: &str) -> Result<bool>;
}

type Opener<S> = Box<dyn FnMut() -> Result<S>>;

/// Lazily opened, exclusively owned store
///
/// The underlying store is created on first use and dropped with the
/// handle. Pass the handle to whatever needs the store.
pub struct StoreHandle<S> {
    opener: Opener<S>,
    store: Option<S>,
}

impl<S: EmployeeStore> StoreHandle<S> {
    /// Handle that opens its store with `opener` on first use
    pub fn new(opener: impl FnMut() -> Result<S> + 'static) -> Self {
        Self {
            opener: Box::new(opener),
            store: None,
        }
    }

    /// Whether the store has been opened yet
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// The open store, opening it if needed
    pub fn store(&mut self) -> Result<&mut S> {
        if self.store.is_none() {
            log::debug!("Opening employee store");
            let opened = (self.opener)()?;
            self.store = Some(opened);
        }
        self.store
            .as_mut()
            .ok_or_else(|| RosterError::store("employee store is not open"))
    }
}

impl<S> std::fmt::Debug for StoreHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("open", &self.store.is_some())
            .finish()
    }
}

impl<S: EmployeeStore> EmployeeStore for StoreHandle<S> {
    fn list_employees(&mut self) -> Result<Vec<Employee>> {
        self.store()?.list_employees()
    }

    fn append_employee(&mut self, employee: &Employee) -> Result<bool> {
        self.store()?.append_employee(employee)
    }

    fn update_employee(&mut self, identifier: &str, employee: &Employee) -> Result<bool> {
        self.store()?.update_employee(identifier, employee)
    }

    fn delete_employee(&mut self, identifier: &str) -> Result<bool> {
        self.store()?.delete_employee(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_handle_opens_once_on_first_use() {
        let opened = Rc::new(Cell::new(0));
        let counter = Rc::clone(&opened);
        let mut handle = StoreHandle::new(move || {
            counter.set(counter.get() + 1);
            Ok(MemoryStore::new())
        });

        assert!(!handle.is_open());
        assert_eq!(opened.get(), 0);

        handle.list_employees().unwrap();
        handle.list_employees().unwrap();
        assert!(handle.is_open());
        assert_eq!(opened.get(), 1);
    }

    #[test]
    fn test_handle_open_failure_is_surfaced() {
        let mut handle: StoreHandle<MemoryStore> =
            StoreHandle::new(|| Err(RosterError::store("credentials rejected")));
        let err = handle.list_employees().unwrap_err();
        assert!(err.to_string().contains("credentials rejected"));
        assert!(!handle.is_open());
    }
}
