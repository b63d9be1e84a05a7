//! Load config from file, environment and command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exporter configuration. File: ~/.config/toppeers/config.toml or /etc/toppeers/config.toml.
/// Env overrides: TOPPEERS_HOST, TOPPEERS_TIMEOUT_SECS, TOPPEERS_TOP_N, TOPPEERS_OUTPUT.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Node RPC host, with or without scheme (default localhost:26657).
    #[serde(default = "default_host")]
    pub host: String,
    /// Request timeout in seconds (default 30). Must be at least 1.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of peers to export (default 5).
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Output file (default peers.txt).
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_host() -> String {
    "localhost:26657".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_top_n() -> usize {
    toppeers_core::DEFAULT_TOP_N
}
fn default_output() -> PathBuf {
    PathBuf::from("peers.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_secs: default_timeout_secs(),
            top_n: default_top_n(),
            output: default_output(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub top_n: Option<usize>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: timeout_secs must be at least 1")]
    ZeroTimeout { path: PathBuf },
}

/// Load config: merge default, then config file (if present), then env vars, then flags.
pub fn load(overrides: &Overrides) -> Result<Config, ConfigError> {
    let mut c = match &overrides.config {
        Some(path) => read_file(path)?,
        None => load_file().unwrap_or_default(),
    };
    apply_env(&mut c, |key| std::env::var(key).ok());
    apply_overrides(&mut c, overrides);
    Ok(c)
}

fn apply_env(c: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(s) = var("TOPPEERS_HOST") {
        c.host = s;
    }
    if let Some(s) = var("TOPPEERS_TIMEOUT_SECS") {
        match s.parse::<u64>() {
            Ok(t) if t > 0 => c.timeout_secs = t,
            _ => log::warn!("ignoring TOPPEERS_TIMEOUT_SECS={s:?}: not a positive number of seconds"),
        }
    }
    if let Some(s) = var("TOPPEERS_TOP_N") {
        match s.parse::<usize>() {
            Ok(n) => c.top_n = n,
            Err(_) => log::warn!("ignoring TOPPEERS_TOP_N={s:?}: not a count"),
        }
    }
    if let Some(s) = var("TOPPEERS_OUTPUT") {
        c.output = PathBuf::from(s);
    }
}

fn apply_overrides(c: &mut Config, o: &Overrides) {
    if let Some(host) = &o.host {
        c.host = host.clone();
    }
    if let Some(t) = o.timeout_secs {
        c.timeout_secs = t;
    }
    if let Some(n) = o.top_n {
        c.top_n = n;
    }
    if let Some(output) = &o.output {
        c.output = output.clone();
    }
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/toppeers/config.toml"));
    }
    out.push(PathBuf::from("/etc/toppeers/config.toml"));
    out
}

fn load_file() -> Option<Config> {
    let path = config_paths().into_iter().find(|p| p.exists())?;
    match read_file(&path) {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("{e}; using defaults");
            None
        }
    }
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let c = toml::from_str::<Config>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if c.timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout {
            path: path.to_path_buf(),
        });
    }
    Ok(c)
}
