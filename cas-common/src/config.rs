// cas-common/src/config.rs
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use tracing::debug;

use super::error::{CasError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://commonchemistry.cas.org/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration namespace and key the API key lives under.
pub const CONFIG_NAMESPACE: &str = "cas";
pub const CONFIG_KEY: &str = "api_key";

pub const API_KEY_ENV: &str = "CAS_API_KEY";
pub const CONFIG_DIR_ENV: &str = "CAS_CONFIG_DIR";
pub const BASE_URL_ENV: &str = "CAS_API_BASE_URL";
const CONFIG_FILENAME: &str = "cas.toml";

/// One link in the API key fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Explicit(String),
    Env(String),
    /// TOML file with a `[cas]` table holding `api_key`.
    File(PathBuf),
}

impl KeySource {
    /// explicit argument > `CAS_API_KEY` > config file
    pub fn default_chain(explicit: Option<&str>) -> Vec<KeySource> {
        let mut chain = Vec::with_capacity(3);
        if let Some(key) = explicit {
            chain.push(KeySource::Explicit(key.to_string()));
        }
        chain.push(KeySource::Env(API_KEY_ENV.to_string()));
        if let Some(path) = default_config_file() {
            chain.push(KeySource::File(path));
        }
        chain
    }

    fn lookup(&self) -> Result<Option<String>> {
        let value = match self {
            KeySource::Explicit(key) => Some(key.clone()),
            KeySource::Env(var) => env::var(var).ok(),
            KeySource::File(path) => read_key_from_file(path)?,
        };
        Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    fn describe(&self) -> String {
        match self {
            KeySource::Explicit(_) => "explicit argument".to_string(),
            KeySource::Env(var) => format!("environment variable {var}"),
            KeySource::File(path) => format!("config file {}", path.display()),
        }
    }
}

/// Walks the chain in order and returns the first non-empty key.
pub fn resolve_api_key(sources: &[KeySource]) -> Result<String> {
    for source in sources {
        if let Some(key) = source.lookup()? {
            debug!("Resolved CAS API key from {}", source.describe());
            return Ok(key);
        }
        debug!("No CAS API key in {}", source.describe());
    }
    let tried: Vec<String> = sources.iter().map(KeySource::describe).collect();
    Err(CasError::Config(format!(
        "no API key found for [{CONFIG_NAMESPACE}] {CONFIG_KEY} (tried: {}). \
         Request one at https://www.cas.org/services/commonchemistry-api",
        tried.join(", ")
    )))
}

/// `$CAS_CONFIG_DIR/cas.toml`, falling back to `~/.config/cas.toml`.
pub fn default_config_file() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILENAME));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join(CONFIG_FILENAME))
}

fn read_key_from_file(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&text)
        .map_err(|e| CasError::Toml(path.display().to_string(), e.to_string()))?;
    let Some(section) = table.get(CONFIG_NAMESPACE) else {
        return Ok(None);
    };
    let section = section.as_table().ok_or_else(|| {
        CasError::Toml(
            path.display().to_string(),
            format!("`{CONFIG_NAMESPACE}` must be a table"),
        )
    })?;
    match section.get(CONFIG_KEY) {
        None => Ok(None),
        Some(toml::Value::String(key)) => Ok(Some(key.clone())),
        Some(other) => Err(CasError::Toml(
            path.display().to_string(),
            format!(
                "`{CONFIG_NAMESPACE}.{CONFIG_KEY}` must be a string, got {}",
                other.type_str()
            ),
        )),
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolves the API key through the default chain. Fails before any
    /// request is made when no key can be found.
    pub fn load(explicit_api_key: Option<&str>) -> Result<Self> {
        debug!("Loading CAS client configuration");
        let config = Self::from_sources(&KeySource::default_chain(explicit_api_key))?;
        let config = match env::var(BASE_URL_ENV).ok().filter(|s| !s.is_empty()) {
            Some(url) => {
                debug!("{} overrides API base URL: {}", BASE_URL_ENV, url);
                config.with_base_url(url)
            }
            None => config,
        };
        debug!("Configuration loaded successfully.");
        Ok(config)
    }

    pub fn from_sources(sources: &[KeySource]) -> Result<Self> {
        resolve_api_key(sources).map(Self::with_api_key)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint below the API base, e.g. `detail`.
    pub fn endpoint(&self, part: &str) -> String {
        format!("{}{}", self.base_url, part.trim_start_matches('/'))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
