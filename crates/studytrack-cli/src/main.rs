//! studytrack command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studytrack", version, about = "Study progress scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score progress from exported status records
    Score {
        /// JSON export of status records (overrides the config file)
        #[arg(long)]
        records: Option<PathBuf>,

        /// JSON export of chapter completion flags
        #[arg(long)]
        completions: Option<PathBuf>,

        /// Subjects to include (comma-separated, default: config or whole catalog)
        #[arg(long)]
        subjects: Option<String>,

        /// Catalog TOML replacing the shipped tables
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory to save the JSON report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compare two progress reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Minimum change in points to report
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// Exit code 1 if any chapter lost ground
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a catalog for authoring defects
    Validate {
        /// Catalog TOML (default: shipped tables)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List catalog subjects and their grading schemes
    Subjects {
        /// Catalog TOML (default: shipped tables)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter to one family (science, math, language_reading, language_writing)
        #[arg(long)]
        family: Option<String>,
    },

    /// Create starter config, catalog, and sample records
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studytrack=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            records,
            completions,
            subjects,
            catalog,
            config,
            output,
            format,
        } => {
            commands::score::execute(
                records,
                completions,
                subjects,
                catalog,
                config,
                output,
                format,
            )
            .await
        }
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Subjects { catalog, family } => commands::subjects::execute(catalog, family),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
