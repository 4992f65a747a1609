use anyhow::Result;
use colored::Colorize;

use medivision_core::modules::{config as core_config, load_config, update_config};
use medivision_types::AppConfig;

pub fn show_config(json: bool) -> Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "MediVision Configuration:".cyan().bold());
        println!("  Default Model: {}", config.default_model);
        println!("  Default Language: {}", config.default_language);
        println!("  History Limit: {}", config.history_limit);
        println!(
            "  Cost per 1K tokens: input ${:.4}, output ${:.4}",
            config.cost.input_per_1k, config.cost.output_per_1k
        );
        println!(
            "  Generation: temperature {}, top_p {}, top_k {}, max tokens {}",
            config.generation.temperature,
            config.generation.top_p,
            config.generation.top_k,
            config.generation.max_output_tokens
        );
        println!("  Safety Threshold: {}", config.safety_threshold);
        println!("  API Base URL: {}", config.api_base_url);
        println!("  Request Timeout: {}s", config.request_timeout_secs);
    }
    Ok(())
}

pub fn show_config_path() -> Result<()> {
    let path = core_config::config_path().map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("{}", path.display());
    Ok(())
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", key, value))
}

/// Apply `key = value` to `config`, parsing the value for the field's type.
pub fn apply_setting(config: &mut AppConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "default_model" => config.default_model = value.to_string(),
        "default_language" => config.default_language = value.to_string(),
        "history_limit" => config.history_limit = parse(key, value)?,
        "cost.input_per_1k" => config.cost.input_per_1k = parse(key, value)?,
        "cost.output_per_1k" => config.cost.output_per_1k = parse(key, value)?,
        "generation.temperature" => config.generation.temperature = parse(key, value)?,
        "generation.top_p" => config.generation.top_p = parse(key, value)?,
        "generation.top_k" => config.generation.top_k = parse(key, value)?,
        "generation.max_output_tokens" => config.generation.max_output_tokens = parse(key, value)?,
        "safety_threshold" => config.safety_threshold = value.to_string(),
        "api_base_url" => config.api_base_url = value.to_string(),
        "request_timeout_secs" => config.request_timeout_secs = parse(key, value)?,
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
    Ok(())
}

pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    // Parse against a scratch copy first so a bad value never reaches disk.
    let mut candidate = load_config().map_err(|e| anyhow::anyhow!(e.user_message()))?;
    apply_setting(&mut candidate, key, value)?;

    update_config(|config| *config = candidate).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    tracing::info!("[Config] {} set to {}", key, value);
    println!("{} Config updated: {} = {}", "✓".green(), key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_setting() {
        let mut config = AppConfig::new();
        apply_setting(&mut config, "history_limit", "25").unwrap();
        apply_setting(&mut config, "cost.output_per_1k", "0.002").unwrap();
        apply_setting(&mut config, "default_language", "French").unwrap();

        assert_eq!(config.history_limit, 25);
        assert!((config.cost.output_per_1k - 0.002).abs() < f64::EPSILON);
        assert_eq!(config.default_language, "French");

        assert!(apply_setting(&mut config, "history_limit", "many").is_err());
        assert!(apply_setting(&mut config, "proxy.port", "1").is_err());
    }
}
