use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use promptpad_server::{DEFAULT_BIND_ADDRESS, DEFAULT_PROMPTS_FILE, ServerConfig};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "~/.promptpad/config.toml";

#[derive(Debug, Clone, Default)]
pub struct CliFlags {
    pub bind: Option<String>,
    pub prompts_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub prompts_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            prompts_file: PathBuf::from(DEFAULT_PROMPTS_FILE),
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid by the config file when it exists, overlaid by CLI
    /// flags, then normalized and validated.
    pub fn load(config_path: Option<&Path>, cli: &CliFlags) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|error| anyhow!("failed to read config {}: {error}", path.display()))?;
            let persisted: PersistedConfig = toml::from_str(&text)
                .map_err(|error| anyhow!("failed to parse config {}: {error}", path.display()))?;
            persisted.into_runtime()
        } else {
            AppConfig::default()
        };

        config.apply_cli_overrides(cli);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(anyhow!(
                "bind address {:?} is not a valid socket address",
                self.bind_address
            ));
        }
        if self.prompts_file.as_os_str().is_empty() {
            return Err(anyhow!("prompts file path cannot be empty"));
        }
        Ok(())
    }

    fn apply_cli_overrides(&mut self, cli: &CliFlags) {
        if let Some(bind) = &cli.bind {
            self.bind_address = bind.clone();
        }
        if let Some(path) = &cli.prompts_file {
            self.prompts_file = path.clone();
        }
    }

    fn normalize_paths(&mut self) {
        self.prompts_file = expand_tilde_path(&self.prompts_file);
    }
}

impl From<AppConfig> for ServerConfig {
    fn from(config: AppConfig) -> Self {
        Self {
            bind_address: config.bind_address,
            prompts_file: config.prompts_file,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct PersistedConfig {
    #[serde(default)]
    server: PersistedServerConfig,
}

impl PersistedConfig {
    fn into_runtime(self) -> AppConfig {
        AppConfig {
            bind_address: self
                .server
                .bind
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            prompts_file: self
                .server
                .prompts_file
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_FILE)),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct PersistedServerConfig {
    #[serde(default)]
    bind: Option<String>,
    #[serde(default)]
    prompts_file: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    expand_tilde_path(&PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn expand_tilde_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(stripped) = path_str.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }

    if path_str == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        if let Err(error) = std::fs::write(&path, text) {
            panic!("failed to write config fixture: {error}");
        }
        path
    }

    fn temp_dir() -> tempfile::TempDir {
        match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create tempdir: {error}"),
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = temp_dir();
        let absent = dir.path().join("nope.toml");

        let config = match AppConfig::load(Some(&absent), &CliFlags::default()) {
            Ok(config) => config,
            Err(error) => panic!("load should succeed: {error}"),
        };
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.prompts_file, PathBuf::from(DEFAULT_PROMPTS_FILE));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = temp_dir();
        let path = write_config(&dir, "[server]\nbind = \"127.0.0.1:4000\"\n");

        let config = match AppConfig::load(Some(&path), &CliFlags::default()) {
            Ok(config) => config,
            Err(error) => panic!("load should succeed: {error}"),
        };
        assert_eq!(config.bind_address, "127.0.0.1:4000");
        assert_eq!(config.prompts_file, PathBuf::from(DEFAULT_PROMPTS_FILE));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = temp_dir();
        let path = write_config(
            &dir,
            "[server]\nbind = \"127.0.0.1:4000\"\nprompts_file = \"from-file.json\"\n",
        );
        let cli = CliFlags {
            bind: Some("127.0.0.1:5000".to_string()),
            prompts_file: Some(PathBuf::from("from-flag.json")),
        };

        let config = match AppConfig::load(Some(&path), &cli) {
            Ok(config) => config,
            Err(error) => panic!("load should succeed: {error}"),
        };
        assert_eq!(config.bind_address, "127.0.0.1:5000");
        assert_eq!(config.prompts_file, PathBuf::from("from-flag.json"));
    }

    #[test]
    fn validate_rejects_malformed_bind_address() {
        let config = AppConfig {
            bind_address: "not-an-address".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_path_expands() {
        let path = default_config_path();
        assert!(!path.to_string_lossy().contains('~'));
    }
}
