use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "medivision",
    about = "MediVision - educational medical image and symptom analysis with Gemini",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true, help = "Google AI Studio API key")]
    pub api_key: Option<String>,

    #[arg(short, long, global = true, default_value = "warn", help = "Log level (RUST_LOG overrides)")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Analyze symptoms and/or a medical image once")]
    Analyze(AnalyzeArgs),

    #[command(about = "Start an interactive analysis session")]
    Session {
        #[arg(long, help = "Model display name or id")]
        model: Option<String>,

        #[arg(long, help = "Response language")]
        language: Option<String>,
    },

    #[command(about = "List supported models")]
    Models,

    #[command(about = "List supported response languages")]
    Languages,

    #[command(about = "List prompt styles and regeneration options")]
    Styles,

    #[command(about = "List example query templates")]
    Templates,

    #[command(subcommand, about = "View and modify configuration")]
    Config(ConfigCommands),
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[arg(short, long, conflicts_with = "template", help = "Symptoms or question")]
    pub text: Option<String>,

    #[arg(long, help = "Use an example template as the query (see `medivision templates`)")]
    pub template: Option<String>,

    #[arg(short, long, help = "Image file (png, jpg, jpeg)")]
    pub image: Option<PathBuf>,

    #[arg(long, help = "Input mode: \"Text Only\", \"Image Only\" or \"Text + Image\" (inferred when omitted)")]
    pub mode: Option<String>,

    #[arg(long, help = "Model display name or id")]
    pub model: Option<String>,

    #[arg(long, help = "Response language")]
    pub language: Option<String>,

    #[arg(long, help = "Prompt style name")]
    pub style: Option<String>,

    #[arg(long, help = "Wait for the whole answer instead of streaming")]
    pub no_stream: bool,

    #[arg(long, help = "Write a Markdown report to this file or directory")]
    pub export: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Print the configuration file path")]
    Path,

    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (e.g., 'default_model', 'cost.input_per_1k')")]
        key: String,

        #[arg(help = "New value")]
        value: String,
    },
}
