use std::path::PathBuf;

use anyhow::{Context, Result};

use picfolio_api_client::{ClientConfig, CONFIG_FILE_NAME};

/// Config directory (~/.config/picfolio/).
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("picfolio"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))
}

pub fn save(config: &ClientConfig) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    Ok(())
}

pub fn show() -> Result<()> {
    let config = load()?;
    println!("server url:      {}", config.server.url);
    println!("request timeout: {}s", config.server.request_timeout_secs);
    println!("config file:     {}", config_path()?.display());
    Ok(())
}

pub fn set(server: Option<String>) -> Result<()> {
    let mut config = load()?;
    if let Some(server) = server {
        config.server.url = server;
    }
    save(&config)?;
    println!("Config updated.");
    Ok(())
}
