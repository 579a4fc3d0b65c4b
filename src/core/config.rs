//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fareadmin/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{CredentialProvider, StaticToken, TokenFile};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub token_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TableConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub dwell_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_DWELL_SECS: u64 = 3;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
const DEFAULT_TOKEN_FILE: &str = "token";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub page_size: usize,
    pub dwell: Duration,
    pub log_level: String,
    /// Inline token from env or config; wins over `token_file`.
    pub token: Option<String>,
    pub token_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

/// A config file that exists but cannot be used. Both variants carry the
/// offending path so the caller can point the user at it.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid TOML in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

const CONFIG_TEMPLATE: &str = r#"# fareadmin configuration
# Every key is optional. Uncomment a line to change it.
# Lookup order: built-in default, this file, environment, command line.

# [general]
# log_level = "debug"                # error | warn | info | debug | trace

# [api]
# base_url = "http://localhost:3000/api/v1"   # env: FAREADMIN_BASE_URL
# token = "eyJ..."                   # env: FAREADMIN_TOKEN
# token_file = "token"               # relative to ~/.fareadmin/

# [table]
# page_size = 5

# [notifications]
# dwell_secs = 3
"#;

/// Where the loaded settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file existed; a commented template was written here.
    Template(PathBuf),
    /// No file and none written (no home directory, or the write failed).
    BuiltIn,
}

/// Returns `~/.fareadmin/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fareadmin"))
}

/// Returns the path to `~/.fareadmin/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Loads `~/.fareadmin/config.toml`. See [`load_config_from`].
pub fn load_config() -> Result<(AdminConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((AdminConfig::default(), ConfigSource::BuiltIn)),
    }
}

/// Reads the config at `path`. A missing file is not an error: the template
/// is written in its place and built-in defaults are returned.
pub fn load_config_from(path: &Path) -> Result<(AdminConfig, ConfigSource), ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let source = match write_template(path) {
                Ok(()) => ConfigSource::Template(path.to_path_buf()),
                Err(e) => {
                    warn!("Could not write config template to {}: {}", path.display(), e);
                    ConfigSource::BuiltIn
                }
            };
            return Ok((AdminConfig::default(), source));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = toml::from_str::<AdminConfig>(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Config: {:?}", config);
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

fn write_template(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, CONFIG_TEMPLATE)
}

// ============================================================================
// Resolution
// ============================================================================

/// Overrides given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AdminConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("FAREADMIN_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Page size: CLI → config → default, never below 1
    let page_size = cli
        .page_size
        .or(config.table.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    // Token: env → config
    let token = std::env::var("FAREADMIN_TOKEN")
        .ok()
        .or_else(|| config.api.token.clone());

    let token_file = resolve_token_file(config);

    ResolvedConfig {
        base_url,
        page_size,
        dwell: Duration::from_secs(
            config
                .notifications
                .dwell_secs
                .unwrap_or(DEFAULT_DWELL_SECS),
        ),
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        token,
        token_file,
    }
}

/// Token file: absolute paths are used as-is, relative ones live under ~/.fareadmin/.
fn resolve_token_file(config: &AdminConfig) -> PathBuf {
    let name = config
        .api
        .token_file
        .clone()
        .unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string());
    let path = PathBuf::from(&name);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

/// Build the credential provider: an inline token wins over the token file.
pub fn build_credentials(config: &ResolvedConfig) -> Arc<dyn CredentialProvider> {
    match config.token {
        Some(ref token) => {
            info!("Using inline bearer token");
            Arc::new(StaticToken::new(Some(token.clone())))
        }
        None => {
            info!("Reading bearer token from {}", config.token_file.display());
            Arc::new(TokenFile::new(config.token_file.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AdminConfig::default();
        assert!(config.api.base_url.is_none());
        assert!(config.table.page_size.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AdminConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(resolved.dwell, Duration::from_secs(DEFAULT_DWELL_SECS));
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert!(resolved.token_file.ends_with("token"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AdminConfig {
            table: TableConfig { page_size: Some(10) },
            notifications: NotificationConfig { dwell_secs: Some(5) },
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.page_size, 10);
        assert_eq!(resolved.dwell, Duration::from_secs(5));
        assert_eq!(resolved.log_level, "info");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = AdminConfig {
            api: ApiConfig {
                base_url: Some("http://config.example/api".to_string()),
                ..Default::default()
            },
            table: TableConfig { page_size: Some(10) },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://cli.example/api".to_string()),
            page_size: Some(3),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://cli.example/api");
        assert_eq!(resolved.page_size, 3);
    }

    #[test]
    fn test_page_size_never_zero() {
        let cli = CliOverrides {
            page_size: Some(0),
            ..Default::default()
        };
        let resolved = resolve(&AdminConfig::default(), &cli);
        assert_eq!(resolved.page_size, 1);
    }

    #[test]
    fn test_absolute_token_file_kept() {
        let config = AdminConfig {
            api: ApiConfig {
                token_file: Some("/tmp/fareadmin-token".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_token_file(&config),
            PathBuf::from("/tmp/fareadmin-token")
        );
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
log_level = "warn"

[api]
base_url = "https://fares.example/api/v1"
token = "abc"

[table]
page_size = 8

[notifications]
dwell_secs = 4
"#;
        let config: AdminConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://fares.example/api/v1")
        );
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.table.page_size, Some(8));
        assert_eq!(config.notifications.dwell_secs, Some(4));
        assert_eq!(config.general.log_level.as_deref(), Some("warn"));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fareadmin-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_writes_template() {
        let dir = scratch_dir("template");
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let (config, source) = load_config_from(&path).unwrap();
        assert_eq!(source, ConfigSource::Template(path.clone()));
        assert!(config.api.base_url.is_none());

        // The template is all comments, so it loads as defaults next time.
        let (config, source) = load_config_from(&path).unwrap();
        assert_eq!(source, ConfigSource::File(path.clone()));
        assert!(config.table.page_size.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = scratch_dir("malformed");
        let path = dir.join("config.toml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "[table]\npage_size = \"five\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[table]
page_size = 7
"#;
        let config: AdminConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.table.page_size, Some(7));
        assert!(config.api.base_url.is_none());
        assert!(config.notifications.dwell_secs.is_none());
    }
}
