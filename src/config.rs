// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! typed site configuration. Configuration is loaded at startup from an
//! optional JSON file, then environment overrides, then defaults for whatever
//! is still unset.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SITE_CONFIG` | Path to the site configuration JSON file | `config/site.json` |
//! | `AUTHORS_FILE` | Path to the author data JSON file | `data/authors.json` |
//! | `OUTPUT_DIR` | Destination for the static `.well-known/webfinger` file | `output` |
//! | `SITE_URL` | Overrides `url` from the site configuration | unset |
//! | `WEBFINGER_STATIC` | Overrides `webfinger.static` (`true`/`false`) | unset |
//! | `WEBFINGER_ALLOWED_ORIGINS` | Overrides `webfinger.allowed_origins` | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! ## Site configuration file
//!
//! ```json
//! {
//!   "url": "https://bagend.com",
//!   "webfinger": { "static": false, "allowed_origins": "https://bagend.com" }
//! }
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SITE_CONFIG_ENV: &str = "SITE_CONFIG";
pub const AUTHORS_FILE_ENV: &str = "AUTHORS_FILE";
pub const OUTPUT_DIR_ENV: &str = "OUTPUT_DIR";
pub const SITE_URL_ENV: &str = "SITE_URL";
pub const WEBFINGER_STATIC_ENV: &str = "WEBFINGER_STATIC";
pub const WEBFINGER_ALLOWED_ORIGINS_ENV: &str = "WEBFINGER_ALLOWED_ORIGINS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SITE_CONFIG: &str = "config/site.json";
pub const DEFAULT_AUTHORS_FILE: &str = "data/authors.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_STATIC: bool = true;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read site configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("site configuration {path} is malformed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("webfinger.allowed_origins is not a valid header value: {0}")]
    InvalidAllowedOrigins(String),

    #[error("site host is not configured")]
    MissingHost,

    #[error("site url {0} does not name a host")]
    MalformedHost(String),
}

/// The `webfinger` block of the site configuration.
///
/// Fields stay optional so operator-supplied values can be told apart from
/// defaults; see [`WebfingerSettings::with_defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebfingerSettings {
    /// Render `.well-known/webfinger` as a static file.
    #[serde(rename = "static", default)]
    pub static_file: Option<bool>,
    /// Value of the `Access-Control-Allow-Origin` response header.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

impl WebfingerSettings {
    pub fn defaults() -> Self {
        Self {
            static_file: Some(DEFAULT_STATIC),
            allowed_origins: Some(DEFAULT_ALLOWED_ORIGINS.to_string()),
        }
    }

    /// Fill unset values from `defaults`. Values already present win.
    pub fn with_defaults(self, defaults: WebfingerSettings) -> Self {
        Self {
            static_file: self.static_file.or(defaults.static_file),
            allowed_origins: self.allowed_origins.or(defaults.allowed_origins),
        }
    }

    pub fn static_enabled(&self) -> bool {
        self.static_file.unwrap_or(DEFAULT_STATIC)
    }

    pub fn allowed_origins(&self) -> &str {
        self.allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS)
    }
}

/// Site-level configuration consumed by the WebFinger endpoint and the static
/// file generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// Public URL of the site, e.g. `https://bagend.com`.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub webfinger: WebfingerSettings,
}

impl SiteConfig {
    /// Read a configuration file. A missing file yields an empty config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `SITE_CONFIG`, apply environment overrides, fill defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env_or_default(SITE_CONFIG_ENV, DEFAULT_SITE_CONFIG);
        let mut config = Self::from_file(path)?;

        if let Some(url) = env_present(SITE_URL_ENV) {
            config.url = Some(url);
        }
        if let Some(value) = env_present(WEBFINGER_STATIC_ENV) {
            config.webfinger.static_file = Some(parse_bool(WEBFINGER_STATIC_ENV, &value)?);
        }
        if let Some(origins) = env_present(WEBFINGER_ALLOWED_ORIGINS_ENV) {
            config.webfinger.allowed_origins = Some(origins);
        }

        Ok(config.initialize())
    }

    /// Apply the WebFinger defaults without overwriting configured values.
    pub fn initialize(mut self) -> Self {
        self.webfinger = self.webfinger.with_defaults(WebfingerSettings::defaults());
        self
    }

    /// Host portion of the site url.
    ///
    /// `http`/`https` urls yield their host; a scheme-less value such as
    /// `bagend.com` is taken verbatim; any other scheme is rejected.
    pub fn host(&self) -> Result<String, ConfigError> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingHost)?;

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed
                .host_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MalformedHost(url.to_string())),
            Ok(_) => Err(ConfigError::MalformedHost(url.to_string())),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(url.to_string()),
            Err(_) => Err(ConfigError::MalformedHost(url.to_string())),
        }
    }
}

/// Where to bind and which files to read, resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub authors_file: PathBuf,
    pub output_dir: PathBuf,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env_present(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: env_or_default(HOST_ENV, DEFAULT_HOST),
            port,
            authors_file: env_or_default(AUTHORS_FILE_ENV, DEFAULT_AUTHORS_FILE).into(),
            output_dir: env_or_default(OUTPUT_DIR_ENV, DEFAULT_OUTPUT_DIR).into(),
        })
    }
}

fn env_present(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    env_present(name).unwrap_or_else(|| default.to_string())
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(url: Option<&str>) -> SiteConfig {
        SiteConfig {
            url: url.map(str::to_string),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn defaults_fill_unset_values() {
        let config = SiteConfig::default().initialize();

        assert_eq!(config.webfinger.static_file, Some(true));
        assert_eq!(config.webfinger.allowed_origins.as_deref(), Some("*"));
    }

    #[test]
    fn merging_prefers_preexisting_values() {
        let settings = WebfingerSettings {
            static_file: Some(false),
            allowed_origins: None,
        };
        let merged = settings.with_defaults(WebfingerSettings {
            static_file: Some(true),
            allowed_origins: Some("https://bagend.com".into()),
        });

        assert!(!merged.static_enabled());
        assert_eq!(merged.allowed_origins(), "https://bagend.com");
    }

    #[test]
    fn parses_configuration_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(
            &path,
            r#"{"url": "https://bagend.com", "webfinger": {"static": false}}"#,
        )
        .unwrap();

        let config = SiteConfig::from_file(&path).unwrap().initialize();

        assert_eq!(config.url.as_deref(), Some("https://bagend.com"));
        assert!(!config.webfinger.static_enabled());
        assert_eq!(config.webfinger.allowed_origins(), "*");
    }

    #[test]
    fn missing_configuration_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::from_file(dir.path().join("absent.json")).unwrap();

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn malformed_configuration_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{"webfinger": {"static": "maybe"}}"#).unwrap();

        assert!(matches!(
            SiteConfig::from_file(&path),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn host_from_http_url() {
        assert_eq!(site(Some("https://bagend.com")).host().unwrap(), "bagend.com");
        assert_eq!(
            site(Some("http://bagend.com:4000/blog")).host().unwrap(),
            "bagend.com"
        );
    }

    #[test]
    fn host_from_generic_url() {
        assert_eq!(site(Some("bagend.com")).host().unwrap(), "bagend.com");
    }

    #[test]
    fn host_errors() {
        assert!(matches!(site(None).host(), Err(ConfigError::MissingHost)));
        assert!(matches!(site(Some("  ")).host(), Err(ConfigError::MissingHost)));
        assert!(matches!(
            site(Some("mailto:bilbo@bagend.com")).host(),
            Err(ConfigError::MalformedHost(_))
        ));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool(WEBFINGER_STATIC_ENV, "TRUE").unwrap());
        assert!(!parse_bool(WEBFINGER_STATIC_ENV, "off").unwrap());
        assert!(parse_bool(WEBFINGER_STATIC_ENV, "maybe").is_err());
    }
}
