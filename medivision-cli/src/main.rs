//! MediVision command line front end.
//!
//! Streams Gemini analyses of symptoms and medical images to the terminal.
//! Educational use only; nothing printed here is a diagnosis.

use anyhow::Result;
use clap::Parser;

mod analyze_commands;
mod catalog_commands;
mod cli;
mod commands;
mod config_commands;
mod output;
mod session_commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    medivision_core::modules::init_logging(&cli.log_level)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    match cli.command {
        Commands::Analyze(args) => commands::handle_analyze(args, cli.api_key).await,
        Commands::Session { model, language } => {
            commands::handle_session(model, language, cli.api_key).await
        },
        Commands::Models => commands::handle_models(),
        Commands::Languages => commands::handle_languages(),
        Commands::Styles => commands::handle_styles(),
        Commands::Templates => commands::handle_templates(),
        Commands::Config(cmd) => commands::handle_config_command(cmd),
    }
}
