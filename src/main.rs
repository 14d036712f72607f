use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_cli::cli;
use expense_cli::config::{paths::ExpensePaths, settings::Settings};
use expense_cli::reports::ReportPeriod;
use expense_cli::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "expense-cli records your expenses and produces monthly totals \
                  with a per-category breakdown. Run without a subcommand to \
                  start the interactive menu."
)]
struct Cli {
    /// Data file to use instead of the configured one
    #[arg(short, long, global = true, env = "EXPENSE_CLI_FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50" or "$12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Category (e.g., food, transportation)
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the monthly total and category breakdown
    Report {
        /// Month (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Export the breakdown to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recorded expenses
    #[command(alias = "ls")]
    List {
        /// Only show this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
        /// Only show this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Export all expenses to a CSV file
    Export {
        /// Path of the CSV file to write
        path: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings, cli.verbose);

    let data_file = settings.resolve_data_file(&paths, cli.file);
    tracing::debug!(data_file = %data_file.display(), "resolved data file");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            cli::start_shell(data_file.clone(), settings)
                .with_context(|| format!("Expense tracker stopped ({})", data_file.display()))?;
        }
        Commands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let mut store = open_store(&data_file)?;
            cli::handle_add(&mut store, &settings, &amount, description, category, date)?;
        }
        Commands::Report {
            month,
            year,
            output,
        } => {
            let period = cli::resolve_period(month, year)?;
            let store = open_store(&data_file)?;
            cli::handle_report(&store, &settings, period, output)?;
        }
        Commands::List { month, year } => {
            let period = if month.is_some() || year.is_some() {
                Some(cli::resolve_period(month, year)?)
            } else {
                None
            };
            let store = open_store(&data_file)?;
            cli::handle_list(&store, &settings, period)?;
        }
        Commands::Export { path } => {
            let store = open_store(&data_file)?;
            cli::handle_export(&store, &path)?;
        }
        Commands::Config => {
            let created = settings
                .save_if_missing(&paths)
                .with_context(|| format!("Failed to write {}", paths.settings_file().display()))?;

            println!("expense-cli Configuration");
            println!("=========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data file:        {}", data_file.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log level:       {}", settings.log_level);
            println!("  Current period:  {}", ReportPeriod::current());
            if created {
                println!();
                println!("Created default settings file.");
            }
        }
    }

    Ok(())
}

fn open_store(path: &std::path::Path) -> Result<ExpenseStore> {
    ExpenseStore::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Diagnostics go to stderr so they never mix with menu output
fn init_tracing(settings: &Settings, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("expense_cli=debug,expense=debug")
        } else {
            EnvFilter::new(&settings.log_level)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
