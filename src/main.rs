use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use usdfx::core::convert::{SortKey, SortOrder};
use usdfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct SortArgs {
    /// Sort by country, code or amount
    #[arg(short, long, default_value_t = SortKey::Country)]
    sort: SortKey,

    /// Sort in descending order
    #[arg(short, long)]
    desc: bool,
}

impl From<SortArgs> for SortOrder {
    fn from(args: SortArgs) -> SortOrder {
        SortOrder::new(args.sort, args.desc)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert a USD amount into every supported currency
    Convert {
        /// Amount in USD, e.g. 1,000
        amount: String,
        #[command(flatten)]
        sort: SortArgs,
        /// Number of currency columns in the table
        #[arg(long)]
        columns: Option<usize>,
        /// Fetch new rates even if the cached ones are fresh
        #[arg(short, long)]
        refresh: bool,
    },
    /// Print the conversion as plain lines for the clipboard
    Export {
        /// Amount in USD, e.g. 1,000
        amount: String,
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Fetch and cache the latest rates
    Refresh,
}

impl From<Commands> for usdfx::AppCommand {
    fn from(cmd: Commands) -> usdfx::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                sort,
                columns,
                refresh,
            } => usdfx::AppCommand::Convert {
                amount,
                order: sort.into(),
                columns,
                refresh,
            },
            Commands::Export { amount, sort } => usdfx::AppCommand::Export {
                amount,
                order: sort.into(),
            },
            Commands::Refresh => usdfx::AppCommand::Refresh,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => usdfx::cli::setup::setup(),
        Some(cmd) => usdfx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
