use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use population_projector::{
    io,
    models::{CountryRecord, GrowthInputs, IndicatorVector, Projection, RateTriple},
    visualization::{
        print_country_summary, print_projection_metadata, print_pyramid_table,
        print_scenario_table, print_trajectory_table,
    },
    IndicatorRequest, Projector, ProjectorConfig, RateRequest,
};

#[derive(Parser)]
#[command(
    name = "pop-projector",
    about = "Population Projector - scenario-driven demographic projections",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG and the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CountrySource {
    /// Path to a countries JSON file
    #[arg(long)]
    countries: Option<PathBuf>,

    /// Country to seed the projection from
    #[arg(long, requires = "countries")]
    country: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project population in 5-year steps from socioeconomic indicators
    Indicators {
        #[command(flatten)]
        source: CountrySource,

        /// Seed population
        #[arg(short, long)]
        population: Option<f64>,

        /// GDP per capita (USD)
        #[arg(long)]
        gdp: Option<f64>,

        /// Life expectancy (years)
        #[arg(long)]
        life: Option<f64>,

        /// Urbanization (% of population)
        #[arg(long)]
        urban: Option<f64>,

        /// GDP scenario: high, medium, low, stagnant, or decline
        #[arg(long, default_value = "medium")]
        gdp_scenario: String,

        /// Life expectancy scenario
        #[arg(long, default_value = "medium")]
        life_scenario: String,

        /// Urbanization scenario
        #[arg(long, default_value = "medium")]
        urban_scenario: String,

        /// Projection horizon in years
        #[arg(long, default_value = "75")]
        horizon: u32,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project population yearly from vital rates and growth inputs
    Rates {
        #[command(flatten)]
        source: CountrySource,

        /// Seed population
        #[arg(short, long)]
        population: Option<f64>,

        /// Births per 1000 per year
        #[arg(long)]
        birth_rate: Option<f64>,

        /// Deaths per 1000 per year
        #[arg(long)]
        death_rate: Option<f64>,

        /// Net migrants per 1000 per year
        #[arg(long, allow_negative_numbers = true)]
        migration_rate: Option<f64>,

        /// Annual GDP growth (%)
        #[arg(long, default_value = "2.0", allow_negative_numbers = true)]
        gdp_growth: f64,

        /// Annual life expectancy growth (%)
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        life_growth: f64,

        /// Annual urbanization growth (%)
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        urban_growth: f64,

        /// Number of years to project
        #[arg(short, long, default_value = "50")]
        years: u32,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a country's seed data and age pyramid
    Country {
        /// Path to a countries JSON file
        #[arg(long)]
        countries: PathBuf,

        /// Country name (case-insensitive)
        #[arg(long)]
        country: String,
    },

    /// Age a country's pyramid forward using its recorded rates
    Pyramid {
        /// Path to a countries JSON file
        #[arg(long)]
        countries: PathBuf,

        /// Country name (case-insensitive)
        #[arg(long)]
        country: String,

        /// Years ahead of the seed year
        #[arg(short, long, default_value = "25")]
        years: u32,

        /// Print the pyramid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the configured scenario table
    Scenarios,
}

fn load_config(path: Option<&PathBuf>) -> Result<ProjectorConfig> {
    match path {
        Some(path) => Ok(ProjectorConfig::load(path)?),
        None => Ok(ProjectorConfig::default()),
    }
}

fn init_logging(cli_level: Option<&str>, config: &ProjectorConfig) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_record(path: &Path, name: &str) -> Result<CountryRecord> {
    let store = io::read_countries_json(path)?;
    Ok(store.get(name)?.clone())
}

fn load_country(source: &CountrySource) -> Result<Option<CountryRecord>> {
    match (&source.countries, &source.country) {
        (Some(path), Some(name)) => Ok(Some(load_record(path, name)?)),
        (Some(_), None) => anyhow::bail!("--countries given without --country"),
        _ => Ok(None),
    }
}

fn required(value: Option<f64>, flag: &str) -> Result<f64> {
    match value {
        Some(v) => Ok(v),
        None => anyhow::bail!("{flag} is required unless --country is given"),
    }
}

fn print_projection(projection: &Projection, json: bool) -> Result<()> {
    if json {
        println!("{}", io::projection_to_json(projection, true)?);
    } else {
        print_trajectory_table(projection);
        print_projection_metadata(projection);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_logging(cli.log_level.as_deref(), &config)?;

    let projector = Projector::from_config(config);

    match cli.command {
        Commands::Indicators {
            source,
            population,
            gdp,
            life,
            urban,
            gdp_scenario,
            life_scenario,
            urban_scenario,
            horizon,
            json,
        } => {
            let (seed, indicators) = match load_country(&source)? {
                Some(record) => (
                    population.unwrap_or(record.population as f64),
                    IndicatorVector::new(
                        gdp.unwrap_or(record.gdp_per_capita),
                        life.unwrap_or(record.life_expectancy),
                        urban.unwrap_or(record.urbanization),
                    ),
                ),
                None => (
                    required(population, "--population")?,
                    IndicatorVector::new(
                        required(gdp, "--gdp")?,
                        required(life, "--life")?,
                        required(urban, "--urban")?,
                    ),
                ),
            };

            let request = IndicatorRequest::new(seed, indicators, horizon).with_scenarios(
                &gdp_scenario,
                &life_scenario,
                &urban_scenario,
            );
            let projection = projector.project_indicators(&request)?;

            if !json {
                println!(
                    "\n{}",
                    format!("Indicator Projection: {horizon} years").bold().cyan()
                );
            }
            print_projection(&projection, json)?;
        }

        Commands::Rates {
            source,
            population,
            birth_rate,
            death_rate,
            migration_rate,
            gdp_growth,
            life_growth,
            urban_growth,
            years,
            json,
        } => {
            let (seed, rates) = match load_country(&source)? {
                Some(record) => {
                    let recorded = record.rates();
                    (
                        population.unwrap_or(record.population as f64),
                        RateTriple::new(
                            birth_rate.unwrap_or(recorded.birth),
                            death_rate.unwrap_or(recorded.death),
                            migration_rate.unwrap_or(recorded.migration),
                        ),
                    )
                }
                None => (
                    required(population, "--population")?,
                    RateTriple::new(
                        required(birth_rate, "--birth-rate")?,
                        required(death_rate, "--death-rate")?,
                        migration_rate.unwrap_or(0.0),
                    ),
                ),
            };

            let growth = GrowthInputs {
                gdp: gdp_growth,
                life: life_growth,
                urban: urban_growth,
            };
            let request = RateRequest::new(seed, rates, growth, years);
            let projection = projector.project_rates(&request)?;

            if !json {
                println!(
                    "\n{}",
                    format!("Rate Projection: {years} years").bold().cyan()
                );
            }
            print_projection(&projection, json)?;
        }

        Commands::Country { countries, country } => {
            let record = load_record(&countries, &country)?;
            let key = country.to_lowercase();
            print_country_summary(&key, &record);
            print_pyramid_table(
                &format!("Population Pyramid - {}", projector.config().seed_year),
                &record.pyramid()?,
            );
        }

        Commands::Pyramid {
            countries,
            country,
            years,
            json,
        } => {
            let record = load_record(&countries, &country)?;
            let key = country.to_lowercase();
            let (target_year, pyramid) = projector.country_pyramid_ahead(&record, years)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&pyramid)?);
            } else {
                println!(
                    "\n{}",
                    format!("Age Pyramid Projection: {key}").bold().cyan()
                );
                print_pyramid_table(&format!("Population Pyramid - {target_year}"), &pyramid);
            }
        }

        Commands::Scenarios => {
            print_scenario_table(&projector.config().scenarios);
        }
    }

    Ok(())
}
