//! Workforce analytics
//!
//! The retirement readiness pipeline runs leaves first: title features
//! ([`features`]), clustering ([`kmeans`], [`readiness`]), then succession
//! gaps ([`succession`]). [`statistics`] and [`crosstab`] back the dashboard
//! and heatmap screens. Everything here is pure and recomputed per snapshot.

pub mod crosstab;
pub mod features;
pub mod kmeans;
pub mod readiness;
pub mod statistics;
pub mod succession;

pub use crosstab::CrossTab;
pub use features::{classify_title, seniority_score};
pub use readiness::{BandSummary, ClassifiedEmployee, ClassifiedRoster, ClusteringOutcome};
pub use succession::{SuccessionAnalysis, SuccessionGap};
