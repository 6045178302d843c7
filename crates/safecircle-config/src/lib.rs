use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use safecircle_core::domain::{PhoneNormalizer, PrefixOrder};
use safecircle_core::rules::SyncOptions;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "safecircle";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub phone: PhoneConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneConfig {
    pub prefix_order: PrefixOrder,
}

impl PhoneConfig {
    pub fn normalizer(&self) -> PhoneNormalizer<'static> {
        PhoneNormalizer::with_order(self.prefix_order)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncConfig {
    pub require_valid: bool,
}

impl SyncConfig {
    pub fn options(&self) -> SyncOptions {
        SyncOptions {
            require_valid: self.require_valid,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    phone: Option<PhoneFile>,
    sync: Option<SyncFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    prefix_order: Option<PrefixOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SyncFile {
    require_valid: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)))
}

fn merge_config(parsed: ConfigFile) -> AppConfig {
    let mut config = AppConfig::default();

    if let Some(phone) = parsed.phone {
        if let Some(order) = phone.prefix_order {
            config.phone.prefix_order = order;
        }
    }

    if let Some(sync) = parsed.sync {
        if let Some(require_valid) = sync.require_valid {
            config.sync.require_valid = require_valid;
        }
    }

    config
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
