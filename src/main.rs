use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_budget_command, handle_goal_command, handle_report_command, handle_settings_command,
    handle_transaction_command, BudgetCommands, GoalCommands, ReportCommands, SettingsCommands,
    TransactionCommands,
};
use finance_tracker::config::paths::{FinancePaths, DATA_DIR_ENV};
use finance_tracker::display::format_settings;
use finance_tracker::logging;
use finance_tracker::storage::init::needs_initialization;
use finance_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker",
    long_about = "Track income and expenses, keep spending within per-category budgets \
                  and save towards goals. Data is stored as JSON files on this machine."
)]
struct Cli {
    /// Base directory for settings and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log informational messages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Reports and budget alerts
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Initialize the data directory with default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Delete every transaction, budget and goal and reset settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Serve JSON requests line by line on stdin/stdout
    Ipc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let relay = matches!(cli.command, Some(Commands::Ipc));
    logging::init(if cli.verbose || relay {
        logging::VERBOSE_DIRECTIVE
    } else {
        logging::DEFAULT_DIRECTIVE
    });

    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };

    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&storage, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing finance tracker at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            storage.load_all()?;
            println!("Initialization complete!");
            println!();
            let categories = storage.settings.categories()?;
            println!("Default categories:");
            println!("  Income:   {}", categories.income.join(", "));
            println!("  Expenses: {}", categories.expense.join(", "));
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            print!("{}", format_settings(&storage.settings.get_all()?));
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                println!("This deletes every transaction, budget and goal.");
                println!("Use --yes to confirm");
                return Ok(());
            }
            storage.reset_all()?;
            println!("All data has been reset.");
        }
        Some(Commands::Ipc) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            finance_tracker::ipc::serve(&storage, stdin.lock(), stdout.lock())?;
        }
        None => {
            println!("Finance tracker - transactions, budgets and savings goals");
            println!();
            println!("Run 'finance --help' for usage information.");
            if needs_initialization(&paths) {
                println!("Run 'finance init' to set up the data directory.");
            }
        }
    }

    Ok(())
}
