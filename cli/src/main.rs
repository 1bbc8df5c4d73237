//! Survey CLI
//!
//! Command-line front end for building, checking and reading surveys stored
//! as JSON or YAML files.
//!
//! # Usage
//!
//! ```bash
//! survey new --field "TEXT:Name*" --field "RADIO:Experience*:Yes|No" > survey.json
//! survey validate survey.json
//! survey preview survey.json --responses answers.json
//! survey format survey.json answers.json --format json
//! survey check survey.json answers.json
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "survey")]
#[command(version)]
#[command(about = "Build, check and read casting surveys", long_about = None)]
struct Cli {
    /// Output format (defaults to the configured one, then table)
    #[arg(long, short, env = "SURVEY_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Log filter, e.g. "survey_forms=debug"
    #[arg(long, env = "SURVEY_LOG")]
    log: Option<String>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a survey definition
    Validate {
        /// Survey file (JSON or YAML)
        schema: String,
    },
    /// Show the form a respondent would fill in
    Preview {
        schema: String,
        /// Partial answers to show in the inputs
        #[arg(long, short)]
        responses: Option<String>,
        /// Pre-select default options on unanswered choice questions
        #[arg(long)]
        defaults: bool,
    },
    /// Display stored answers against their survey
    Format {
        schema: String,
        responses: String,
    },
    /// Verify every required question is answered
    Check {
        schema: String,
        responses: String,
    },
    /// Build a survey from field specs `TYPE:Label[*][:Option|Option...]`
    New {
        /// Field spec; a trailing `*` on the label marks it required
        #[arg(long = "field", short = 'f', required = true)]
        fields: Vec<String>,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();

    let filter = cli
        .log
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .or_else(|| config.log_filter.clone())
        .unwrap_or_else(|| "warn".into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli
        .format
        .or_else(|| config.default_format.as_deref().and_then(output::OutputFormat::parse))
        .unwrap_or(output::OutputFormat::Table);

    let result = match cli.command {
        Commands::Validate { schema } => commands::schema::validate(&schema, format),
        Commands::Preview { schema, responses, defaults } => {
            commands::schema::preview(&schema, responses.as_deref(), defaults, format)
        }
        Commands::New { fields } => commands::schema::build(&fields, format),
        Commands::Format { schema, responses } => commands::responses::format(&schema, &responses, format),
        Commands::Check { schema, responses } => commands::responses::check(&schema, &responses, format),
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
