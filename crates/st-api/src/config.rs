//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// System-wide config file, merged before any explicitly-passed one.
const SYSTEM_CONFIG: &str = "/etc/screentime/config.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Directory holding the per-user sentinel files. Must stay pointed
    /// at the directory the time-tracking daemon writes.
    pub work_dir: PathBuf,
    /// Path of the passwd-format account database.
    pub passwd_file: PathBuf,
    /// Path of the shadow-format account database.
    pub shadow_file: PathBuf,
    /// Path of the file supplying the normal-user UID bounds.
    pub login_defs_file: PathBuf,
    /// Account excluded from tracking: the administrator who elevated
    /// privileges to run this service. Defaults to `SUDO_USER`.
    pub operator: Option<String>,
    /// Absolute base URL used in hypermedia links. Defaults to
    /// `http://{host}:{port}`.
    pub public_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            work_dir: PathBuf::from("/var/lib/timekpr/work"),
            passwd_file: PathBuf::from("/etc/passwd"),
            shadow_file: PathBuf::from("/etc/shadow"),
            login_defs_file: PathBuf::from("/etc/login.defs"),
            operator: None,
            public_url: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Merge order: built-in defaults, the system config file, the
    /// explicit file, then `ST_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(SYSTEM_CONFIG));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("ST_"));

        let mut config: Self = figment.extract()?;
        if config.operator.as_deref().is_none_or(str::is_empty) {
            // The operator is whoever elevated privileges to start the
            // service, unless the configuration pins one explicitly.
            config.operator = std::env::var("SUDO_USER").ok().filter(|s| !s.is_empty());
        }
        Ok(config)
    }

    /// The socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for hypermedia links.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}
