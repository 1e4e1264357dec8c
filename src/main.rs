use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};

use money_tracker::cli::{
    handle_add_command, handle_audit_command, handle_categories_command,
    handle_dashboard_command, handle_delete_command, handle_export_command,
    handle_import_command, handle_list_command, handle_report_command, handle_show_command,
    EntryArgs, ExportFormat, KindArg, ListArgs, ReportCommands,
};
use money_tracker::config::{Settings, TrackerPaths};
use money_tracker::models::TransactionKind;
use money_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "money",
    version,
    about = "Personal income and expense tracker",
    long_about = "Money Tracker records income and expenses in a local SQLite ledger \
                  and reports where the money went: totals per category for a period \
                  and income against expenses month by month."
)]
struct Cli {
    /// Directory holding settings, ledger and audit log
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// List the income and expense categories
    Categories {
        /// Only show one kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Record a transaction
    Add {
        /// income or expense
        #[arg(value_enum)]
        kind: KindArg,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Record income (shortcut for `add income`)
    Income(EntryArgs),

    /// Record an expense (shortcut for `add expense`)
    #[command(alias = "spend")]
    Expense(EntryArgs),

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show total income, expenses and net balance
    Dashboard,

    /// Category breakdown and monthly trend reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the ledger
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore transactions from a JSON or YAML export
    Import {
        /// Path to the export file
        file: PathBuf,
    },

    /// Show recent entries from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    debug!("Using data directory {}", paths.base_dir().display());

    let today = chrono::Local::now().date_naive();

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Money Tracker - personal income and expense tracker");
            println!();
            println!("Run 'money --help' for usage information.");
            println!("Run 'money add expense 12.50 -c Food' to record your first expense.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            println!("Initializing Money Tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if paths.is_initialized() {
                println!("Settings file already exists, keeping it.");
            } else {
                settings.save(&paths)?;
            }
            Storage::open(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'money categories' to see the available categories.");
            return Ok(());
        }
        Commands::Config => {
            println!("Money Tracker Configuration");
            println!("===========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no (run 'money init')" }
            );
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger database:  {}", paths.database_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default period:  {}", settings.default_period.key());
            println!("  Trend months:    {}", settings.trend_months);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            return Ok(());
        }
        Commands::Categories { kind } => {
            handle_categories_command(kind)?;
            return Ok(());
        }
        _ => {}
    }

    let mut storage = Storage::open(&paths)?;
    if settings.audit_enabled {
        storage.enable_audit(paths.audit_log());
    }

    match command {
        Commands::Add { kind, entry } => {
            handle_add_command(&storage, &settings, kind.into(), entry, today)?;
        }
        Commands::Income(entry) => {
            handle_add_command(&storage, &settings, TransactionKind::Income, entry, today)?;
        }
        Commands::Expense(entry) => {
            handle_add_command(&storage, &settings, TransactionKind::Expense, entry, today)?;
        }
        Commands::List(args) => handle_list_command(&storage, &settings, args, today)?,
        Commands::Show { id } => handle_show_command(&storage, &settings, &id)?,
        Commands::Delete { id, force } => handle_delete_command(&storage, &settings, &id, force)?,
        Commands::Dashboard => {
            handle_dashboard_command(&storage, &settings, std::io::stdout().is_terminal())?;
        }
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd, today)?,
        Commands::Export { format, output } => {
            handle_export_command(&storage, &paths, format, output)?;
        }
        Commands::Import { file } => handle_import_command(&storage, &file)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
        Commands::Init | Commands::Config | Commands::Categories { .. } => {}
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
