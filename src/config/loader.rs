// Configuration loader
// Loads settings from coach.toml / ~/.coach/config.toml and the environment

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{HOME_CONFIG_FILE, LOCAL_CONFIG_FILE};
use super::provider::ProviderEntry;
use super::settings::{Config, FeaturesConfig, ServerConfig};
use crate::errors;

/// Values taken from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// A complete provider entry built from AZURE_OPENAI_* / OPENAI_API_KEY
    pub provider: Option<ProviderEntry>,
    /// COACH_BIND_ADDRESS
    pub bind_address: Option<String>,
}

impl EnvOverrides {
    pub fn from_process_env() -> Self {
        Self {
            provider: ProviderEntry::from_env(),
            bind_address: std::env::var("COACH_BIND_ADDRESS")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// On-disk layout of the config file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    server: Option<ServerConfig>,
    #[serde(default)]
    features: Option<FeaturesConfig>,
    #[serde(default)]
    provider: Option<ProviderEntry>,
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `./coach.toml` and then
/// `~/.coach/config.toml` are tried; if neither exists the configuration is
/// built from the environment alone.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let env = EnvOverrides::from_process_env();

    let (file, searched) = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            (Some(read_config_file(path)?), vec![path.display().to_string()])
        }
        None => {
            let candidates = default_config_paths();
            let searched = candidates.iter().map(|p| p.display().to_string()).collect();
            let found = candidates.into_iter().find(|p| p.exists());
            match found {
                Some(path) => {
                    tracing::info!("Loading configuration from {}", path.display());
                    (Some(read_config_file(&path)?), searched)
                }
                None => (None, searched),
            }
        }
    };

    build_config(file, env, &searched)
}

/// Parse config file contents without consulting the environment.
pub fn parse_config(contents: &str) -> Result<Config> {
    let file: TomlConfig = toml::from_str(contents)
        .map_err(|e| anyhow::anyhow!(errors::config_parse_error("<inline>", &e.to_string())))?;
    build_config(Some(file), EnvOverrides::default(), &[])
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(HOME_CONFIG_FILE));
    }
    paths
}

fn read_config_file(path: &Path) -> Result<TomlConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    toml::from_str(&contents).map_err(|e| {
        anyhow::anyhow!(errors::config_parse_error(
            &path.display().to_string(),
            &e.to_string()
        ))
    })
}

fn build_config(file: Option<TomlConfig>, env: EnvOverrides, searched: &[String]) -> Result<Config> {
    let file = file.unwrap_or_default();

    // A complete provider from the environment takes precedence over the file
    let provider = match (env.provider, file.provider) {
        (Some(from_env), _) => from_env,
        (None, Some(from_file)) => from_file,
        (None, None) => bail!(errors::missing_config_error(searched)),
    };

    let mut config = Config::with_provider(provider);
    if let Some(server) = file.server {
        config.server = server;
    }
    if let Some(features) = file.features {
        config.features = features;
    }
    if let Some(bind_address) = env.bind_address {
        config.server.bind_address = bind_address;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Configuration validation failed")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const AZURE_FILE: &str = r#"
        [server]
        bind_address = "0.0.0.0:9000"

        [features]
        insights_enabled = true

        [provider]
        type = "azure"
        api_key = "file-key"
        endpoint = "https://file.openai.azure.com"
        deployment = "file-deploy"
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(AZURE_FILE).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert!(config.features.insights_enabled);
        assert_eq!(config.provider.api_key(), "file-key");
    }

    #[test]
    fn test_missing_provider_is_an_error() {
        let err = parse_config("[server]\nbind_address = \"127.0.0.1:1\"\n").unwrap_err();
        assert!(err.to_string().contains("No provider configuration found"));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(parse_config("[databse]\nurl = \"x\"\n").is_err());
    }

    #[test]
    fn test_env_provider_overrides_file() {
        let file: TomlConfig = toml::from_str(AZURE_FILE).unwrap();
        let env = EnvOverrides {
            provider: Some(ProviderEntry::Openai {
                api_key: "env-key".to_string(),
                model: None,
                base_url: None,
            }),
            bind_address: Some("127.0.0.1:7000".to_string()),
        };

        let config = build_config(Some(file), env, &[]).unwrap();
        assert_eq!(config.provider.api_key(), "env-key");
        assert_eq!(config.server.bind_address, "127.0.0.1:7000");
        assert!(config.features.insights_enabled);
    }

    #[test]
    fn test_env_only_config() {
        let env = EnvOverrides {
            provider: Some(ProviderEntry::Azure {
                api_key: "k".to_string(),
                endpoint: "https://env.openai.azure.com".to_string(),
                deployment: "d".to_string(),
            }),
            bind_address: None,
        };
        let config = build_config(None, env, &[]).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8000");
        assert!(!config.features.insights_enabled);
    }

    #[test]
    fn test_read_config_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(AZURE_FILE.as_bytes()).unwrap();

        let parsed = read_config_file(file.path()).unwrap();
        assert!(parsed.provider.is_some());
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let err = load_config(Some(Path::new("/definitely/not/here/coach.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
