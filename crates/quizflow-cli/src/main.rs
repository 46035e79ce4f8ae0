//! quizflow CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizflow", version, about = "Timed quiz sessions for course modules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Take {
        /// Course identifier
        #[arg(long)]
        course: String,

        /// Module identifier
        #[arg(long)]
        module: String,

        /// Catalog file or directory (overrides the configured source)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Scripted answers as comma-separated zero-based option indices
        /// (e.g. "1,0,2"); submits automatically when every question is
        /// answered
        #[arg(long)]
        answers: Option<String>,

        /// Skip the intro confirmation
        #[arg(long)]
        yes: bool,

        /// Directory for the saved attempt report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Override the quiz time budget in seconds
        #[arg(long)]
        time_limit: Option<u64>,

        /// Also write an HTML review page next to the JSON report
        #[arg(long)]
        html: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List courses and their quizzes
    List {
        /// Catalog file or directory (overrides the configured source)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog files
    Validate {
        /// Path to a catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Render a saved attempt report
    Review {
        /// Path to the attempt report JSON
        #[arg(long)]
        attempt: PathBuf,

        /// Also write an HTML review page to this path
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Create a starter config and example catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizflow=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            course,
            module,
            catalog,
            answers,
            yes,
            output,
            time_limit,
            html,
            config,
        } => {
            commands::take::execute(
                course, module, catalog, answers, yes, output, time_limit, html, config,
            )
            .await
        }
        Commands::List { catalog, config } => commands::list::execute(catalog, config).await,
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Review { attempt, html } => commands::review::execute(attempt, html),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
