use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use roster::algorithm::succession;
use roster::config::RosterConfig;
use roster::export::{self, CLUSTERS_FILE_NAME, RECAP_FILE_NAME, ROSTER_FILE_NAME};
use roster::models::{Employee, Gender, ReadinessBand};
use roster::schema::date_utils::{format_sheet_date, parse_date_string};
use roster::snapshot::Snapshot;
use roster::store::{EmployeeStore, SheetFileStore, StoreHandle};
use roster::views::{self, OutputFormat, View};

#[derive(Parser)]
#[command(name = "roster", version, about = "Civil-service roster analytics")]
struct Cli {
    /// Worksheet file (.csv or .parquet); overrides the configuration
    #[arg(long, global = true)]
    sheet: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty worksheet with the employee header
    Init,
    /// Headline metrics, age distribution and unit headcount
    Dashboard,
    /// List every employee
    List,
    /// Show the edit form of an employee
    Show {
        identifier: String,
    },
    /// Append an employee
    Add {
        identifier: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Overwrite an employee; omitted fields keep their current value
    Update {
        identifier: String,
        /// Change the identifier itself
        #[arg(long)]
        new_id: Option<String>,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee
    Delete {
        identifier: String,
    },
    /// Remaining service years against seniority level, with band centroids
    Scatter,
    /// Readiness band summary, and the members of selected bands
    Clusters {
        /// Band to list in detail (repeatable)
        #[arg(long = "band", value_parser = parse_band)]
        bands: Vec<ReadinessBand>,
    },
    /// Employees close to retirement and successor availability
    Projection(ProjectionArgs),
    /// Mean age and headcount heatmaps
    Heatmaps,
    /// Write a table to a .csv, .parquet or .json file
    Export {
        #[arg(value_enum)]
        target: ExportTarget,
        /// Output file
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[command(flatten)]
        projection: ProjectionArgs,
    },
}

#[derive(Args)]
struct ProjectionArgs {
    /// Maximum remaining service years counted as retiring
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=50))]
    horizon: Option<i32>,

    /// Employees younger than this are potential successors
    #[arg(long, value_parser = clap::value_parser!(u32).range(25..=45))]
    young_age: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    /// The raw roster
    Roster,
    /// Retirement and successor recap
    Recap,
    /// Every employee with derived attributes and band
    Clusters,
}

#[derive(Args, Default)]
struct EmployeeFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    rank_code: Option<String>,
    #[arg(long)]
    suffix_title: Option<String>,
    #[arg(long)]
    job_title: Option<String>,
    /// LAKI-LAKI or PEREMPUAN
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    birthplace: Option<String>,
    /// Birth date, day/month/year
    #[arg(long)]
    birth_date: Option<String>,
    #[arg(long)]
    unit_code: Option<String>,
    #[arg(long)]
    initial_education: Option<String>,
    #[arg(long)]
    final_education: Option<String>,
    /// Age in years; derived from the birth date when omitted on add
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=150))]
    age: Option<u32>,
    #[arg(long)]
    unit_name: Option<String>,
    #[arg(long)]
    competency: Option<String>,
}

impl EmployeeFields {
    /// Overwrite the fields that were given
    fn apply(self, employee: &mut Employee, config: &RosterConfig) -> anyhow::Result<()> {
        let Self {
            name,
            rank_code,
            suffix_title,
            job_title,
            gender,
            birthplace,
            birth_date,
            unit_code,
            initial_education,
            final_education,
            age,
            unit_name,
            competency,
        } = self;

        let set = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *slot = value;
            }
        };
        set(&mut employee.name, name);
        set(&mut employee.rank_code, rank_code);
        set(&mut employee.suffix_title, suffix_title);
        set(&mut employee.job_title, job_title);
        set(&mut employee.birthplace, birthplace);
        set(&mut employee.unit_code, unit_code);
        set(&mut employee.initial_education, initial_education);
        set(&mut employee.final_education, final_education);
        set(&mut employee.unit_name, unit_name);
        set(&mut employee.competency, competency);

        if let Some(gender) = gender {
            employee.gender = match Gender::from(gender.as_str()) {
                Gender::Unknown => bail!("gender must be LAKI-LAKI or PEREMPUAN, got '{gender}'"),
                known => known.sheet_label().to_string(),
            };
        }
        if let Some(text) = birth_date {
            let date = parse_date_string(&text, &config.date_format_config)
                .with_context(|| format!("'{text}' is not a date (expected day/month/year)"))?;
            employee.birth_date = format_sheet_date(date, &config.date_format_config);
        }
        if age.is_some() {
            employee.age = age;
        }
        Ok(())
    }
}

/// The stored record with the given fields overwritten
///
/// Starts from the record as stored, so a birth date that does not parse
/// is kept unless a new one is given.
fn updated_record(
    current: &Employee,
    new_id: Option<String>,
    fields: EmployeeFields,
    config: &RosterConfig,
) -> anyhow::Result<Employee> {
    let mut employee = current.clone();
    if let Some(new_id) = new_id {
        employee.identifier = new_id;
    }
    fields.apply(&mut employee, config)?;
    Ok(employee)
}

fn parse_band(label: &str) -> Result<ReadinessBand, String> {
    ReadinessBand::from_label(label).ok_or_else(|| {
        format!("unknown band '{label}' (Retiring-Soon, Mid-Term, Long-Horizon, Insufficient-Data)")
    })
}

fn load_config(cli: &Cli) -> anyhow::Result<RosterConfig> {
    let config = match &cli.config {
        Some(path) => RosterConfig::from_json_file(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?,
        None => RosterConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(sheet) = &cli.sheet {
        config.sheet_path.clone_from(sheet);
    }
    Ok(config)
}

fn apply_projection_args(config: &mut RosterConfig, args: &ProjectionArgs) {
    if let Some(horizon) = args.horizon {
        config.succession.retirement_horizon_years = horizon;
    }
    if let Some(age) = args.young_age {
        config.succession.young_age_threshold = age;
    }
}

fn emit(views: &[View], format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    views::render(views, format, &mut out).context("Failed to render output")?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    let format = cli.format;
    info!("Using worksheet {}", config.sheet_path.display());

    if matches!(cli.command, Commands::Init) {
        if config.sheet_path.exists() {
            println!("Worksheet {} already exists", config.sheet_path.display());
        } else {
            SheetFileStore::create(&config.sheet_path).with_context(|| {
                format!("Failed to create worksheet {}", config.sheet_path.display())
            })?;
            println!("Created worksheet {}", config.sheet_path.display());
        }
        return Ok(());
    }

    let sheet_path = config.sheet_path.clone();
    let mut store = StoreHandle::new(move || SheetFileStore::open(sheet_path.clone()));
    let mut snapshot = Snapshot::load(&mut store)
        .with_context(|| format!("Failed to load worksheet {}", config.sheet_path.display()))?;
    info!(
        "Loaded {} employees at {}",
        snapshot.len(),
        snapshot.loaded_at().format("%Y-%m-%d %H:%M:%S")
    );
    let today = snapshot.as_of();

    match cli.command {
        Commands::Init => {}
        Commands::Dashboard => emit(&views::dashboard::dashboard(&snapshot)?, format)?,
        Commands::List => emit(&[views::employees::employee_list(&snapshot)?], format)?,
        Commands::Show { identifier } => {
            let Some(employee) = snapshot.find(&identifier) else {
                println!("No employee with identifier {identifier}");
                return Ok(());
            };
            let form = views::employees::edit_form(employee, today, &config.date_format_config)?;
            emit(&[form], format)?;
        }
        Commands::Add { identifier, fields } => {
            let mut employee = Employee {
                identifier,
                ..Employee::default()
            };
            let age_given = fields.age.is_some();
            fields.apply(&mut employee, &config)?;
            if !age_given {
                employee.age = employee.age_from_birth_date(today, &config.date_format_config);
            }
            store
                .append_employee(&employee)
                .context("Failed to append employee")?;
            println!("Added {}", employee.label());
            snapshot.reload(&mut store)?;
            info!("Roster now holds {} employees", snapshot.len());
        }
        Commands::Update {
            identifier,
            new_id,
            fields,
        } => {
            let Some(current) = snapshot.find(&identifier) else {
                println!("No employee with identifier {identifier}");
                return Ok(());
            };
            let employee = updated_record(current, new_id, fields, &config)?;
            if store
                .update_employee(&identifier, &employee)
                .context("Failed to update employee")?
            {
                println!("Updated {}", employee.label());
            } else {
                println!("No employee with identifier {identifier}");
            }
        }
        Commands::Delete { identifier } => {
            let label = snapshot
                .find(&identifier)
                .map_or_else(|| identifier.clone(), Employee::label);
            if store
                .delete_employee(&identifier)
                .context("Failed to delete employee")?
            {
                println!("Deleted {label}");
            } else {
                println!("No employee with identifier {identifier}");
            }
        }
        Commands::Scatter => {
            let roster = snapshot.classify(&config.clustering);
            emit(&views::clusters::scatter(&roster)?, format)?;
        }
        Commands::Clusters { bands } => {
            let roster = snapshot.classify(&config.clustering);
            let mut output = vec![views::clusters::cluster_summary(&roster)?];
            if !bands.is_empty() {
                output.push(views::clusters::cluster_detail(&roster, &bands)?);
            }
            emit(&output, format)?;
        }
        Commands::Projection(args) => {
            apply_projection_args(&mut config, &args);
            let roster = snapshot.classify(&config.clustering);
            let analysis = succession::analyze(roster.employees(), &config.succession);
            emit(
                &views::projection::projection(
                    &analysis,
                    config.succession.retirement_horizon_years,
                )?,
                format,
            )?;
        }
        Commands::Heatmaps => {
            let roster = snapshot.classify(&config.clustering);
            emit(
                &views::heatmaps::heatmaps(&roster, snapshot.employees())?,
                format,
            )?;
        }
        Commands::Export {
            target,
            output,
            projection,
        } => {
            apply_projection_args(&mut config, &projection);
            let roster = snapshot.classify(&config.clustering);
            let (view, default_name) = match target {
                ExportTarget::Roster => (
                    views::employees::employee_list(&snapshot)?,
                    ROSTER_FILE_NAME,
                ),
                ExportTarget::Recap => {
                    let analysis = succession::analyze(roster.employees(), &config.succession);
                    (views::projection::recap(&analysis)?, RECAP_FILE_NAME)
                }
                ExportTarget::Clusters => (
                    views::clusters::cluster_detail(&roster, &ReadinessBand::ALL)?,
                    CLUSTERS_FILE_NAME,
                ),
            };
            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            export::export_view(&view, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("Wrote {} rows to {}", view.num_rows(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        Employee {
            identifier: "7".to_string(),
            name: "DEWI".to_string(),
            job_title: "PELAKSANA".to_string(),
            birth_date: "-".to_string(),
            ..Employee::default()
        }
    }

    #[test]
    fn test_update_keeps_unparseable_birth_date() {
        let fields = EmployeeFields {
            name: Some("DEWI2".to_string()),
            ..EmployeeFields::default()
        };
        let employee = updated_record(&stored(), None, fields, &RosterConfig::default()).unwrap();
        assert_eq!(employee.name, "DEWI2");
        assert_eq!(employee.birth_date, "-");
        assert_eq!(employee.job_title, "PELAKSANA");
    }

    #[test]
    fn test_update_rewrites_given_birth_date() {
        let fields = EmployeeFields {
            birth_date: Some("1980-02-03".to_string()),
            ..EmployeeFields::default()
        };
        let employee =
            updated_record(&stored(), Some("8".to_string()), fields, &RosterConfig::default())
                .unwrap();
        assert_eq!(employee.identifier, "8");
        assert_eq!(employee.birth_date, "03/02/1980");
    }

    #[test]
    fn test_update_rejects_unknown_gender() {
        let fields = EmployeeFields {
            gender: Some("X".to_string()),
            ..EmployeeFields::default()
        };
        assert!(updated_record(&stored(), None, fields, &RosterConfig::default()).is_err());
    }
}
