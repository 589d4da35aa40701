//! Configuration for the roster.
//!
//! Defaults match the dashboard's stock settings. A JSON file can override
//! any subset of fields, and a handful of environment variables override
//! the file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::DateFormatConfig;

/// Environment variable naming the worksheet file
pub const ENV_SHEET: &str = "ROSTER_SHEET";
/// Environment variable for the retirement horizon (years)
pub const ENV_HORIZON_YEARS: &str = "ROSTER_HORIZON_YEARS";
/// Environment variable for the young-employee age threshold
pub const ENV_YOUNG_AGE: &str = "ROSTER_YOUNG_AGE";
/// Environment variable for the clustering seed
pub const ENV_SEED: &str = "ROSTER_SEED";

/// Parameters of the k-means run behind the readiness bands
///
/// The number of clusters is not configurable; it is the number of
/// readiness bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Independent k-means++ initialisations; the lowest inertia wins
    pub restarts: usize,
    /// Base seed; restart `i` is seeded with `seed + i`
    pub seed: u64,
    /// Lloyd iteration cap per restart
    pub max_iterations: usize,
    /// Convergence threshold on total squared centroid movement
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            seed: 42,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Parameters of the succession gap analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessionConfig {
    /// Employees with at most this many remaining service years are retiring
    pub retirement_horizon_years: i32,
    /// Employees strictly younger than this are counted as potential successors
    pub young_age_threshold: u32,
}

impl Default for SuccessionConfig {
    fn default() -> Self {
        Self {
            retirement_horizon_years: 5,
            young_age_threshold: 35,
        }
    }
}

/// Configuration for the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Worksheet file backing the employee store (`.csv` or `.parquet`)
    pub sheet_path: PathBuf,
    /// Date format configuration for birth dates
    pub date_format_config: DateFormatConfig,
    /// Clustering parameters
    pub clustering: ClusteringConfig,
    /// Succession analysis parameters
    pub succession: SuccessionConfig,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            sheet_path: PathBuf::from("pegawai.csv"),
            date_format_config: DateFormatConfig::default(),
            clustering: ClusteringConfig::default(),
            succession: SuccessionConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `ROSTER_*` environment overrides
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(ENV_SHEET) {
            self.sheet_path = PathBuf::from(path);
        }
        if let Some(years) = env_number(ENV_HORIZON_YEARS) {
            self.succession.retirement_horizon_years = years;
        }
        if let Some(age) = env_number(ENV_YOUNG_AGE) {
            self.succession.young_age_threshold = age;
        }
        if let Some(seed) = env_number(ENV_SEED) {
            self.clustering.seed = seed;
        }
        self
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw}: not a number");
            None
        }
    }
}

impl fmt::Display for RosterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Roster Configuration:")?;
        writeln!(f, "  Sheet: {}", self.sheet_path.display())?;
        writeln!(f, "  Date Formats: {}", self.date_format_config.date_formats.join(", "))?;
        writeln!(
            f,
            "  Clustering: restarts={} seed={} max_iter={} tol={}",
            self.clustering.restarts,
            self.clustering.seed,
            self.clustering.max_iterations,
            self.clustering.tolerance
        )?;
        writeln!(
            f,
            "  Retirement Horizon: {} years",
            self.succession.retirement_horizon_years
        )?;
        writeln!(
            f,
            "  Young Age Threshold: {}",
            self.succession.young_age_threshold
        )?;
        Ok(())
    }
}
