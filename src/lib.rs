//! Civil-service roster analytics.
//!
//! Employee records live in a worksheet (CSV or Parquet file, or memory)
//! behind the [`store::EmployeeStore`] trait. From a [`Snapshot`] of the
//! roster the [`algorithm`] module derives job categories, retirement ages
//! and seniority levels from free-text titles, clusters employees into
//! retirement readiness bands, and finds retiring cohorts without young
//! successors. [`views`] turns the results into Arrow tables.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod schema;
pub mod snapshot;
pub mod store;
pub mod utils;
pub mod views;

// Core types
pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use models::{Employee, JobCategory, ReadinessBand};
pub use snapshot::Snapshot;

// Store
pub use store::{EmployeeStore, MemoryStore, SheetFileStore, StoreHandle};

// Analytics
pub use algorithm::{ClassifiedEmployee, ClassifiedRoster, classify_title, seniority_score};

// Arrow types
pub use arrow::record_batch::RecordBatch;
