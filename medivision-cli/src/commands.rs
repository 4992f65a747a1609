use anyhow::Result;

use crate::cli::{AnalyzeArgs, ConfigCommands};

mod analyze_commands_impl {
    pub use crate::analyze_commands::*;
}
mod catalog_commands_impl {
    pub use crate::catalog_commands::*;
}
mod config_commands_impl {
    pub use crate::config_commands::*;
}
mod session_commands_impl {
    pub use crate::session_commands::*;
}

pub async fn handle_analyze(args: AnalyzeArgs, api_key: Option<String>) -> Result<()> {
    analyze_commands_impl::analyze(args, api_key).await
}

pub async fn handle_session(
    model: Option<String>,
    language: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    session_commands_impl::run_session(model, language, api_key).await
}

pub fn handle_models() -> Result<()> {
    catalog_commands_impl::list_models()
}

pub fn handle_languages() -> Result<()> {
    catalog_commands_impl::list_languages()
}

pub fn handle_styles() -> Result<()> {
    catalog_commands_impl::list_styles()
}

pub fn handle_templates() -> Result<()> {
    catalog_commands_impl::list_templates()
}

pub fn handle_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => config_commands_impl::show_config(json),
        ConfigCommands::Path => config_commands_impl::show_config_path(),
        ConfigCommands::Set { key, value } => config_commands_impl::set_config_value(&key, &value),
    }
}
