//! `reasonact config` — Configuration management commands.

use reasonact_config::AppConfig;

pub fn default() {
    print!("{}", AppConfig::default_toml());
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    redact(&mut config);
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() {
    println!("{}", config_path().display());
}

fn config_path() -> std::path::PathBuf {
    AppConfig::config_dir().join("config.toml")
}

/// Drop every secret so the config can be printed.
fn redact(config: &mut AppConfig) {
    config.api_key = None;
    for provider in config.providers.values_mut() {
        provider.api_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonact_config::ProviderConfig;

    #[test]
    fn config_path_is_valid() {
        let path = config_path();
        assert!(path.ends_with(".reasonact/config.toml"));
    }

    #[test]
    fn redact_strips_keys() {
        let mut config = AppConfig {
            api_key: Some("sk-top".into()),
            ..AppConfig::default()
        };
        config.providers.insert(
            "openrouter".into(),
            ProviderConfig {
                api_key: Some("sk-or".into()),
                api_url: None,
            },
        );

        redact(&mut config);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("sk-top"));
        assert!(!toml_str.contains("sk-or"));
    }
}
