use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::DatasetArgs;

#[derive(Parser)]
#[command(
    name = "bigbio-validate",
    about = "Checks that a dataset's bigbio view conforms to the bigbio schema",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every schema, id, reference and offset check
    Validate(DatasetArgs),

    /// Print per-split field statistics
    Stats(DatasetArgs),

    /// Show the schema a task identifier maps to
    Inspect {
        /// Task identifier, e.g. `ner` or `question-answering`
        task: String,
    },

    /// List the recognized task identifiers
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Validate(args) => commands::validate_command(args),
        Commands::Stats(args) => commands::stats_command(args),
        Commands::Inspect { task } => commands::inspect_command(task),
        Commands::List => commands::list_command(),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("bigbio_validate=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("bigbio_validate=info"), // -v: stage messages
        _ => EnvFilter::new("bigbio_validate=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
