//! Layered database configuration.
//!
//! Every option is resolved independently, first match wins:
//!
//! 1. the `[database]` table of the config file (`config/application.toml`,
//!    or the path in `TASKMANAGER_CONFIG`), if the value is present and non-empty;
//! 2. the environment variable, if set and non-empty;
//! 3. the built-in default.
//!
//! | Option                 | Env Var                   | Default                              |
//! |------------------------|---------------------------|--------------------------------------|
//! | `driver`               | `DB_DRIVER`               | `postgres`                           |
//! | `url`                  | `DB_URL`                  | `postgres://localhost:5432/task_db`  |
//! | `user`                 | `DB_USER`                 | `postgres`                           |
//! | `password`             | `DB_PASS`                 | *(empty)*                            |
//! | `max_connections`      | `DB_MAX_CONNECTIONS`      | `10`                                 |
//! | `acquire_timeout_secs` | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                                  |
//! | `idle_timeout_secs`    | `DB_IDLE_TIMEOUT_SECS`    | `600`                                |

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

/// Env var overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "TASKMANAGER_CONFIG";

/// Config file location used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/application.toml";

const DEFAULT_DRIVER: &str = "postgres";
const DEFAULT_URL: &str = "postgres://localhost:5432/task_db";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Database drivers compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
}

impl FromStr for Driver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Driver::Postgres),
            _ => Err(ConfigError::UnsupportedDriver(s.to_string())),
        }
    }
}

/// Raw `[database]` table from the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseSection {
    pub driver: Option<String>,
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DatabaseSection,
}

impl DatabaseSection {
    /// Read the `[database]` table from `path`. A missing file yields an empty section.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        toml::from_str::<ConfigFile>(&contents)
            .map(|file| file.database)
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
    }
}

/// Resolved, immutable database configuration.
///
/// Built once at startup and passed by reference to
/// [`ConnectionProvider::new`](crate::ConnectionProvider::new).
#[derive(Clone)]
pub struct DatabaseConfig {
    pub driver: Driver,
    pub url: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Resolve configuration from the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let section = DatabaseSection::read(&path)?;
        Self::resolve(section, |key| std::env::var(key).ok())
    }

    /// Merge a file section with an environment lookup, then apply defaults.
    pub fn resolve(
        file: DatabaseSection,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let driver = layered(file.driver, env("DB_DRIVER"), DEFAULT_DRIVER).parse()?;
        let url = layered(file.url, env("DB_URL"), DEFAULT_URL);
        let user = layered(file.user, env("DB_USER"), DEFAULT_USER);
        let password = layered(file.password, env("DB_PASS"), "");

        let max_connections = layered_number(
            file.max_connections,
            "max_connections",
            "DB_MAX_CONNECTIONS",
            &env,
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_connections",
                value: max_connections.to_string(),
            });
        }

        let acquire_timeout_secs = layered_number(
            file.acquire_timeout_secs,
            "acquire_timeout_secs",
            "DB_ACQUIRE_TIMEOUT_SECS",
            &env,
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;
        let idle_timeout_secs = layered_number(
            file.idle_timeout_secs,
            "idle_timeout_secs",
            "DB_IDLE_TIMEOUT_SECS",
            &env,
            DEFAULT_IDLE_TIMEOUT_SECS,
        )?;

        let config = Self {
            driver,
            url,
            user,
            password,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        };

        // Reject an unparseable url now rather than on first request.
        config.connect_options()?;
        Ok(config)
    }

    /// Driver-specific connect options with the configured credentials applied.
    ///
    /// The `user` option always wins over a user embedded in the url; the
    /// password is only applied when non-empty.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self.driver {
            Driver::Postgres => {
                if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://"))
                {
                    return Err(ConfigError::InvalidUrl(sqlx::Error::Configuration(
                        "url scheme does not match the postgres driver".into(),
                    )));
                }
                let options =
                    PgConnectOptions::from_str(&self.url).map_err(ConfigError::InvalidUrl)?;
                let options = options.username(&self.user);
                if self.password.is_empty() {
                    Ok(options)
                } else {
                    Ok(options.password(&self.password))
                }
            }
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn layered(file: Option<String>, env: Option<String>, default: &str) -> String {
    non_empty(file)
        .or_else(|| non_empty(env))
        .unwrap_or_else(|| default.to_string())
}

/// Errors name the option (`max_connections`), not the env var, whichever
/// layer supplied the bad value.
fn layered_number<T: FromStr>(
    file: Option<T>,
    key: &'static str,
    env_key: &str,
    env: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    if let Some(value) = file {
        return Ok(value);
    }
    match non_empty(env(env_key)) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
