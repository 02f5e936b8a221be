use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the bookstore service,
/// including server, authentication, database, and tracing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Server configuration settings
    pub server: ServerConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// Server configuration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// gRPC server bind address
    pub grpc_address: SocketAddr,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum AuthConfig {
    /// Basic credentials checked against a fixed user table
    Memory(MemoryAuthConfig),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemoryAuthConfig {
    pub users: Vec<UserConfig>,
}

#[derive(Clone, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub password: String,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum DatabaseConfig {
    /// In-memory database storage
    Memory(MemoryDatabaseConfig),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemoryDatabaseConfig {
    /// JSON document used to seed the store at startup
    pub fixtures: Option<PathBuf>,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// In-memory tracing (no output)
    Memory,
    /// Standard output tracing
    Stdout,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "BOOKSTORE_CONFIG_PATH";
const CONFIG_OVERRIDE_ENV: &str = "BOOKSTORE_CONFIG_OVERRIDE";
const ENV_PREFIX: &str = "BOOKSTORE";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

static INSTANCE: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Loads the global application configuration on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn init() -> AppResult<&'static Self> {
        if let Some(config) = INSTANCE.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(INSTANCE.get_or_init(|| config))
    }

    /// Loads configuration from files and environment variables.
    ///
    /// `BOOKSTORE_CONFIG_PATH` names the directory holding `default` and
    /// `local`, and `BOOKSTORE_CONFIG_OVERRIDE` names an optional file layered
    /// on top of them.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        let override_path = env::var_os(CONFIG_OVERRIDE_ENV).map(PathBuf::from);
        Self::load_from(Path::new(&config_path), override_path.as_deref())
    }

    fn load_from(config_path: &Path, override_path: Option<&Path>) -> AppResult<Self> {
        let mut config_builder =
            Config::builder().set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        let default_path = config_path.join("default");
        config_builder =
            config_builder.add_source(File::with_name(&default_path.to_string_lossy()));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        let local_path = config_path.join("local");
        config_builder = config_builder
            .add_source(File::with_name(&local_path.to_string_lossy()).required(false));

        // Add override settings file.
        if let Some(override_path) = override_path {
            config_builder = config_builder
                .add_source(File::with_name(&override_path.to_string_lossy()).required(false));
        }

        // Add in settings from the environment (with a prefix of BOOKSTORE)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

impl std::fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserConfig")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config");

    #[test]
    fn load_default() {
        let config = AppConfig::load_from(Path::new(CONFIG_DIR), None).unwrap();

        assert_eq!(config.distribution.name, "bookstore");
        assert_eq!(config.distribution.version.as_deref(), Some(VERSION));
        assert_eq!(config.server.grpc_address.port(), 9000);

        let AuthConfig::Memory(auth) = &config.auth;
        assert!(auth.users.iter().any(|user| user.username == "reader"));

        let DatabaseConfig::Memory(database) = &config.database;
        assert!(database.fixtures.is_some());

        assert!(matches!(config.tracing, TracingConfig::Stdout));
    }

    #[test]
    fn override_file_is_layered_over_config_dir() {
        let override_path =
            env::temp_dir().join(format!("bookstore-override-{}.toml", std::process::id()));
        fs::write(
            &override_path,
            "[server]\ngrpc_address = \"0.0.0.0:9100\"\n\n[tracing]\nkind = \"Memory\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Path::new(CONFIG_DIR), Some(&override_path));
        fs::remove_file(&override_path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.server.grpc_address.port(), 9100);
        assert!(matches!(config.tracing, TracingConfig::Memory));
        // Everything else still comes from the directory.
        assert_eq!(config.distribution.name, "bookstore");
        let DatabaseConfig::Memory(database) = &config.database;
        assert!(database.fixtures.is_some());

        let missing = env::temp_dir().join("bookstore-override-missing.toml");
        let config = AppConfig::load_from(Path::new(CONFIG_DIR), Some(&missing)).unwrap();
        assert_eq!(config.server.grpc_address.port(), 9000);
    }

    #[test]
    fn user_debug_hides_password() {
        let user = UserConfig {
            username: "reader".into(),
            password: "s3cret".into(),
        };
        assert!(!format!("{user:?}").contains("s3cret"));
    }
}
