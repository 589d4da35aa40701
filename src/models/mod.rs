//! Domain models for the roster
//!
//! The employee record as stored in the worksheet, plus the enumerations
//! the analytics attach to it.

pub mod employee;
pub mod types;

pub use employee::Employee;
pub use types::{AgeBand, Gender, JobCategory, ReadinessBand};
