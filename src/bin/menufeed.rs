//! menufeed CLI - print the next school days' main entrees
//!
//! Fetches the district FamilyMenu feed (JSON or XML), keeps the configured
//! meal session's main entrees and prints them per day.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use menufeed::serialization::{write_json_array, NdjsonWriter};
use menufeed::{
    build_week, render_text, school_days, FamilyMenuClient, FeedConfig, FeedError, OutputFormat,
    RawDocument, RenderOptions, WeekMenu,
};

const DEFAULT_CONFIG_FILE: &str = "menufeed.yaml";

#[derive(Parser)]
#[command(name = "menufeed")]
#[command(version, about = "Print school lunch main entrees for the next few school days", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the menu and print it
    Show {
        #[command(flatten)]
        menu: MenuArgs,

        /// Save the raw response body here for debugging
        #[arg(long)]
        save_raw: Option<PathBuf>,
    },

    /// Run the pipeline over a saved response instead of fetching
    Parse {
        /// Saved FamilyMenu response (JSON or XML)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        menu: MenuArgs,
    },

    /// Print the school-day window and the request URL
    Dates {
        #[command(flatten)]
        menu: MenuArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct MenuArgs {
    /// Config file (default: ./menufeed.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serving session to include (e.g. Lunch, Breakfast)
    #[arg(short, long)]
    meal: Option<String>,

    /// Number of school days
    #[arg(short, long)]
    days: Option<usize>,

    /// First day, YYYY-MM-DD (default: today)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Include Saturdays and Sundays
    #[arg(long)]
    no_skip_weekends: bool,

    /// Items shown per day before "+N more"
    #[arg(long)]
    max_items: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config precedence: CLI flag > MENUFEED_* env > config file > defaults
fn resolve_config(args: &MenuArgs) -> Result<FeedConfig, FeedError> {
    let mut config = match &args.config {
        Some(path) => FeedConfig::load_from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            FeedConfig::load_from_file(DEFAULT_CONFIG_FILE)?
        }
        None => FeedConfig::default(),
    };

    config.apply_env();

    if let Some(meal) = &args.meal {
        config.meal_session = meal.clone();
    }
    if let Some(days) = args.days {
        config.days_to_show = days;
    }
    if args.no_skip_weekends {
        config.skip_weekends = false;
    }
    if let Some(max_items) = args.max_items {
        config.max_items_per_day = max_items;
    }

    Ok(config)
}

fn window(args: &MenuArgs, config: &FeedConfig) -> Result<Vec<NaiveDate>, FeedError> {
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let dates = school_days(start, config.days_to_show, config.skip_weekends);

    if dates.is_empty() {
        return Err(FeedError::Config("days_to_show must be at least 1".to_string()));
    }
    Ok(dates)
}

fn print_week(week: &WeekMenu, config: &FeedConfig, format: OutputFormat) -> Result<(), FeedError> {
    let stdout = io::stdout();

    match format {
        OutputFormat::Text => {
            let options = RenderOptions {
                max_items_per_day: config.max_items_per_day,
                bullet: config.bullet.clone(),
            };
            print!("{}", render_text(week, &options));
        }
        OutputFormat::Json => write_json_array(stdout.lock(), week)?,
        OutputFormat::Ndjson => NdjsonWriter::new(stdout.lock()).write_week(week)?,
    }

    if week.total_entrees() == 0 {
        eprintln!(
            "No items found. Check the raw response for ServingSession labels and --meal='{}'. \
             If your district uses a different term, try --meal Breakfast/Dinner.",
            config.meal_session
        );
    }

    Ok(())
}

async fn show(menu: MenuArgs, save_raw: Option<PathBuf>) -> Result<(), FeedError> {
    let config = resolve_config(&menu)?;
    let dates = window(&menu, &config)?;
    let (start, end) = (dates[0], dates[dates.len() - 1]);

    let client = FamilyMenuClient::new(&config)?;
    let fetched = client.fetch_range(start, end).await?;

    if let Some(path) = save_raw {
        std::fs::write(&path, &fetched.raw)?;
        tracing::info!("Saved raw response to {}", path.display());
    }

    let week = build_week(&fetched.document, &config.meal_session, &dates, &config.policy());
    print_week(&week, &config, menu.format)
}

fn parse_saved(input: PathBuf, menu: MenuArgs) -> Result<(), FeedError> {
    let config = resolve_config(&menu)?;
    let dates = window(&menu, &config)?;

    let raw = std::fs::read_to_string(&input)?;
    let document = RawDocument::parse(&raw)?;
    tracing::info!("Parsed {} as {}", input.display(), document.format());

    let week = build_week(&document, &config.meal_session, &dates, &config.policy());
    print_week(&week, &config, menu.format)
}

fn print_dates(menu: MenuArgs) -> Result<(), FeedError> {
    let config = resolve_config(&menu)?;
    let dates = window(&menu, &config)?;

    for date in &dates {
        println!("{}  {}", date.format("%Y-%m-%d"), date.format("%A"));
    }

    match FamilyMenuClient::new(&config) {
        Ok(client) => println!("\n{}", client.request_url(dates[0], dates[dates.len() - 1])?),
        Err(e) => eprintln!("\n  ℹ No request URL: {}", e),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("menufeed=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show { menu, save_raw } => show(menu, save_raw).await,
        Commands::Parse { input, menu } => parse_saved(input, menu),
        Commands::Dates { menu } => print_dates(menu),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match e {
            FeedError::MalformedDocument(_) | FeedError::Xml(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
