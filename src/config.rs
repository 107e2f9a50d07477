//! Configuration types and loading logic.
//!
//! Every field has a default, so the file is entirely optional.  Values given
//! on the command line (`--url`, `--key`) override whatever the file says.
//!
//! # File format
//!
//! ```toml
//! [api]
//! url = "http://localhost:3000"   # Grafana base URL
//! key = ""                        # API key; empty = anonymous
//! ```
//!
//! Two files are consulted, the later one winning per field:
//!
//! 1. `~/.config/grafanactl/config.toml`, for machine-wide defaults
//! 2. the `--config` path (default `./grafanactl.toml`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Dashboard API endpoint.
    #[serde(default)]
    pub api: ApiConfig,
}

// ─── [api] ────────────────────────────────────────────────────────────────────

/// Where the dashboard API lives and how to authenticate.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// API key sent as a bearer token.
    ///
    /// **Do not commit real keys.**  Prefer `--key` from a secrets manager.
    #[serde(default)]
    pub key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            key: String::new(),
        }
    }
}

pub fn default_url() -> String {
    "http://localhost:3000".into()
}

// ─── Partial (mergeable) form ─────────────────────────────────────────────────

/// Same shape as [`Config`] with every field optional, so two files can be
/// layered.
#[derive(Debug, Deserialize, Default)]
pub struct PartialConfig {
    #[serde(default)]
    api: PartialApi,
}

#[derive(Debug, Deserialize, Default)]
struct PartialApi {
    url: Option<String>,
    key: Option<String>,
}

impl PartialConfig {
    /// Field-wise merge; values in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            api: PartialApi {
                url: other.api.url.or(self.api.url),
                key: other.api.key.or(self.api.key),
            },
        }
    }

    /// Fill the gaps with defaults.
    pub fn resolve(self) -> Config {
        let base = ApiConfig::default();
        Config {
            api: ApiConfig {
                url: self.api.url.unwrap_or(base.url),
                key: self.api.key.unwrap_or(base.key),
            },
        }
    }
}

/// Parse `path` if it exists.  `Ok(None)` means there is no such file.
pub fn parse_partial(path: &Path) -> Result<Option<PartialConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let partial = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some(partial))
}

/// Location of the machine-wide config file, if the platform has one.
pub fn global_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("grafanactl").join("config.toml"))
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Load and merge the global file (if any) and `local`.
///
/// A missing `local` file is not an error; defaults are used.  An
/// unreadable or invalid file at either location is.
pub fn load_config(global: Option<&Path>, local: &Path) -> Result<Config> {
    let global = match global {
        Some(p) => parse_partial(p)?.unwrap_or_default(),
        None => PartialConfig::default(),
    };

    let local = if let Some(p) = parse_partial(local)? {
        p
    } else {
        info!(path = %local.display(), "config file not found, using defaults");
        PartialConfig::default()
    };

    Ok(global.merge(local).resolve())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{contents}").unwrap();
        f
    }

    #[test]
    fn default_config_points_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.api.url, "http://localhost:3000");
        assert!(cfg.api.key.is_empty());
    }

    #[test]
    fn empty_toml_deserialises_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty toml should parse");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let original = Config {
            api: ApiConfig {
                url: "https://grafana.example.com".into(),
                key: "hunter2".into(),
            },
        };
        let text = toml::to_string(&original).expect("serialisation failed");
        let recovered: Config = toml::from_str(&text).expect("deserialisation failed");
        assert_eq!(recovered, original);
    }

    #[test]
    fn merge_prefers_later_values_per_field() {
        let global: PartialConfig =
            toml::from_str("[api]\nurl = \"http://global\"\nkey = \"g\"").unwrap();
        let local: PartialConfig = toml::from_str("[api]\nkey = \"l\"").unwrap();
        let cfg = global.merge(local).resolve();
        assert_eq!(cfg.api.url, "http://global");
        assert_eq!(cfg.api.key, "l");
    }

    #[test]
    fn load_config_returns_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(None, &dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_config_layers_global_and_local() {
        let global = write_tmp("[api]\nurl = \"http://global:3000\"\n");
        let local = write_tmp("[api]\nkey = \"secret\"\n");
        let cfg = load_config(Some(global.path()), local.path()).unwrap();
        assert_eq!(cfg.api.url, "http://global:3000");
        assert_eq!(cfg.api.key, "secret");
    }

    #[test]
    fn load_config_errors_on_invalid_toml() {
        let f = write_tmp("not valid toml ][[[");
        assert!(load_config(None, f.path()).is_err());
    }

    #[test]
    fn missing_global_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let local = write_tmp("[api]\nurl = \"http://local\"\n");
        let cfg = load_config(Some(&dir.path().join("nope.toml")), local.path()).unwrap();
        assert_eq!(cfg.api.url, "http://local");
    }
}
