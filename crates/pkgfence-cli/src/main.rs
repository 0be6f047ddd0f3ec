//! pkgfence CLI tool.
//!
//! Usage:
//! ```bash
//! pkgfence check [OPTIONS] [PATH]
//! pkgfence explain <IMPORTER> <IMPORTED>
//! pkgfence init
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Package dependency and size checks for Go modules
#[derive(Parser)]
#[command(name = "pkgfence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check package dependencies and sizes
    Check {
        /// Directory inside the Go module (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        rules: RuleArgs,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Explain the decision for a single import edge
    Explain {
        /// Importing package (e.g. `pkg/api`)
        importer: String,

        /// Imported package (e.g. `pkg/orders/db`)
        imported: String,

        /// Directory used to find the project config
        #[arg(long, default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Rule values layered on top of the config file.
#[derive(clap::Args, Debug, Default)]
pub struct RuleArgs {
    /// Extra God patterns (comma-separated)
    #[arg(long, env = "PKGFENCE_GOD", value_delimiter = ',')]
    god: Vec<String>,

    /// Extra Tool patterns (comma-separated)
    #[arg(long, env = "PKGFENCE_TOOL", value_delimiter = ',')]
    tool: Vec<String>,

    /// Extra DB patterns (comma-separated)
    #[arg(long, env = "PKGFENCE_DB", value_delimiter = ',')]
    db: Vec<String>,

    /// Extra allow entries, `importer imported` (comma-separated)
    #[arg(long, env = "PKGFENCE_ALLOW", value_delimiter = ',')]
    allow: Vec<String>,

    /// Maximum package size
    #[arg(long, env = "PKGFENCE_SIZE")]
    size: Option<u64>,
}

impl RuleArgs {
    fn into_overrides(self) -> pkgfence_core::ConfigOverrides {
        let trimmed = |values: Vec<String>| -> Vec<String> {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        };
        pkgfence_core::ConfigOverrides {
            god: trimmed(self.god),
            tool: trimmed(self.tool),
            db: trimmed(self.db),
            allow: trimmed(self.allow),
            size: self.size,
        }
    }
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
        } => commands::check::run(&path, format, rules.into_overrides(), &exclude, config),
        Commands::Explain {
            importer,
            imported,
            path,
            rules,
        } => commands::explain::run(
            &importer,
            &imported,
            &path,
            rules.into_overrides(),
            config,
        ),
        Commands::Init { force } => commands::init::run(force).map(|()| commands::Status::Clean),
    };

    match outcome {
        Ok(status) => status.exit_code(),
        Err(err) => {
            commands::report_error(&err);
            commands::Status::from_error(&err).exit_code()
        }
    }
}
