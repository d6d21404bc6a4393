use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth::cli::{
    handle_audit_command, handle_advice_command, handle_budget_command, handle_category_command,
    handle_clean_command, handle_export_command, handle_period_command, handle_pin_command,
    handle_record_command, handle_summary_command, handle_transaction_command, require_unlocked,
};
use hearth::config::{paths::HearthPaths, settings::Settings};
use hearth::storage::{init::initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "hearth",
    version,
    about = "Household budgeting from the terminal",
    long_about = "Hearth records household income and expenses, tracks permanent and \
                  temporary category budgets, shows monthly budget-versus-actual \
                  differentials and exports CSV reports."
)]
struct Cli {
    /// PIN for the screen lock, if one is set
    #[arg(long, global = true, env = "HEARTH_PIN", hide_env_values = true)]
    pin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(hearth::cli::TransactionCommands),

    /// Category tree commands
    #[command(subcommand)]
    Category(hearth::cli::CategoryCommands),

    /// Permanent budget commands
    #[command(subcommand)]
    Budget(hearth::cli::BudgetCommands),

    /// Temporary budget period commands
    #[command(subcommand)]
    Period(hearth::cli::PeriodCommands),

    /// Monthly summary with budget differentials
    Summary {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Ask the configured advisor about a month
    Advice {
        /// Month to analyse (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export a CSV report
    Export(hearth::cli::ExportArgs),

    /// Delete all transactions and enclosed temporary periods in a date range
    Clean(hearth::cli::CleanArgs),

    /// Record commands
    #[command(subcommand)]
    Record(hearth::cli::RecordCommands),

    /// PIN lock commands
    #[command(subcommand)]
    Pin(hearth::cli::PinCommands),

    /// Show the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("HEARTH_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = HearthPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Hearth - household budgeting");
        println!();
        println!("Run 'hearth --help' for usage information.");
        println!("Run 'hearth tui' to launch the interactive interface.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing Hearth at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories: Hogar, Transporte, Salud, Ocio.");
            println!("Run 'hearth category list' to see them.");
            return Ok(());
        }
        Commands::Config => {
            println!("Hearth Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Locale:            {:?}", settings.locale);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Delete batch size: {}", settings.effective_batch_size());
            println!("  Export years:      {}", settings.export_trailing_years);
            println!("  Advisor:           {}", settings.advisor_command.as_deref().unwrap_or("(none)"));
            println!("  PIN:               {}", if settings.has_pin() { "set" } else { "not set" });
            return Ok(());
        }
        Commands::Tui => {
            let storage = Storage::new(paths)?;
            storage.load_all()?;
            return hearth::tui::run_tui(&storage, &settings);
        }
        _ => {}
    }

    require_unlocked(&settings, cli.pin.as_deref())?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Period(cmd) => handle_period_command(&storage, &settings, cmd)?,
        Commands::Summary { month } => handle_summary_command(&storage, &settings, month.as_deref())?,
        Commands::Advice { month } => handle_advice_command(&storage, &settings, month.as_deref())?,
        Commands::Export(args) => handle_export_command(&storage, &settings, args)?,
        Commands::Clean(args) => handle_clean_command(&storage, &settings, args)?,
        Commands::Record(cmd) => handle_record_command(&storage, &settings, cmd)?,
        Commands::Pin(cmd) => handle_pin_command(&paths, &mut settings, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
        Commands::Init | Commands::Config | Commands::Tui => {}
    }

    Ok(())
}
