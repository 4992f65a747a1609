use std::fs;
use std::path::PathBuf;

use medivision_types::models::{find_model, is_supported_language};
use medivision_types::AppConfig;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

const CONFIG_FILE: &str = "config.json";
const DATA_DIR_ENV: &str = "MEDIVISION_DATA_DIR";

/// Get the data directory path, creating it if needed.
///
/// `$MEDIVISION_DATA_DIR` overrides the platform config directory.
pub fn get_data_dir() -> AppResult<PathBuf> {
    let dir = match std::env::var(DATA_DIR_ENV) {
        Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom.trim()),
        _ => dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?
            .join("medivision"),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

pub fn config_path() -> AppResult<PathBuf> {
    Ok(get_data_dir()?.join(CONFIG_FILE))
}

/// Load application config; a missing file yields defaults.
pub fn load_config() -> AppResult<AppConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &std::path::Path) -> AppResult<AppConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Save application config.
pub fn save_config(config: &AppConfig) -> AppResult<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &AppConfig, path: &std::path::Path) -> AppResult<()> {
    validate(config)?;

    let content = serde_json::to_string_pretty(config)?;
    let temp_path = path.with_extension("json.tmp");

    // Atomic write
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Update specific fields in the config.
pub fn update_config<F>(updater: F) -> AppResult<AppConfig>
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = load_config()?;
    updater(&mut config);
    save_config(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> AppResult<()> {
    if find_model(&config.default_model).is_none() {
        return Err(AppError::Config(format!("Unknown default model: {}", config.default_model)));
    }
    if !is_supported_language(&config.default_language) {
        return Err(AppError::Config(format!(
            "Unsupported default language: {}",
            config.default_language
        )));
    }
    if config.history_limit == 0 {
        return Err(AppError::Config("history_limit must be at least 1".to_string()));
    }
    if config.cost.input_per_1k < 0.0 || config.cost.output_per_1k < 0.0 {
        return Err(AppError::Config("cost rates cannot be negative".to_string()));
    }
    if url::Url::parse(&config.api_base_url).is_err() {
        return Err(AppError::Config(format!("Invalid api_base_url: {}", config.api_base_url)));
    }
    if config.request_timeout_secs < 5 {
        warn!("request_timeout_secs below 5s is raised to 5s by the gateway");
    }
    Ok(())
}
