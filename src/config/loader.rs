//! Layered configuration loading for catalog-rs
//!
//! Sources are merged in this order, later ones winning:
//! `default.toml`, `{environment}.toml`, `local.toml`, then `CATALOG_*`
//! environment variables. Pointing `CATALOG_CONFIG_FILE` at a single file
//! replaces the three file layers.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "CATALOG_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "CATALOG_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "CATALOG";

/// `CATALOG_SERVER__PORT` maps to `server.port`
const ENV_SEPARATOR: &str = "__";

type Builder = ConfigBuilder<DefaultState>;

/// Loads [`Settings`] from files and the process environment
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `CATALOG_CONFIG_DIR`, `CATALOG_CONFIG_FILE`
    /// and `CATALOG_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MutualExclusivityError`] when both the
    /// directory and the file variable are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if dir_var.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                 Use {CONFIG_DIR_ENV} for layered configuration or \
                 {CONFIG_FILE_ENV} for a single configuration file."
            )));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `CATALOG_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load, deserialize and validate the settings.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when `default.toml` (or the single file) is missing
    /// - `ParseError` when the merged configuration has the wrong shape
    /// - `ValidationError` when a value is out of range
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match self.config_file {
            Some(ref file) => Self::add_file_source(Config::builder(), file, true)?,
            None => self.build_layered_config(Config::builder())?,
        };

        Self::add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn build_layered_config(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let builder = Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_file = format!("{}.toml", self.environment.as_str());
        let builder = Self::add_file_source(builder, &self.config_dir.join(env_file), false)?;

        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: Builder,
        path: &Path,
        required: bool,
    ) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::settings::StorageBackend;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that touch process environment variables.
    pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[application]
name = "test-app"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/test"
max_connections = 10
min_connections = 1
connection_timeout = 30

[logger]
level = "info"

[logger.console]
enabled = true
colored = true

[logger.file]
enabled = false
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop.
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        pub(crate) fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn layered_env(dir: &TempDir, app_env: Option<&str>) -> EnvGuard {
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.remove(CONFIG_FILE_ENV);
        match app_env {
            Some(value) => env.set(AppEnvironment::ENV_VAR, value),
            None => env.remove(AppEnvironment::ENV_VAR),
        }
        env
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove(AppEnvironment::ENV_VAR);

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_with_config_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.set(CONFIG_FILE_ENV, "/path/to/catalog.toml");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(
            loader.config_file,
            Some(PathBuf::from("/path/to/catalog.toml"))
        );
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/catalog.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[]);
        let _env = layered_env(&temp_dir, None);

        let result = ConfigLoader::new().unwrap().load();
        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        let _env = layered_env(&temp_dir, None);

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.backend, StorageBackend::Postgres);
        assert_eq!(settings.database.url, "postgres://localhost/test");
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            (
                "production.toml",
                "[application]\nname = \"prod-app\"\n\n[server]\nport = 8080\n\n[database]\nurl = \"postgres://prod/db\"\n",
            ),
            ("local.toml", "[server]\nport = 9999\n"),
        ]);
        let mut env = layered_env(&temp_dir, Some("production"));
        env.set("CATALOG_DATABASE__MAX_CONNECTIONS", "50");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");

        assert_eq!(settings.database.max_connections, 50);
        assert_eq!(settings.server.port, 9999);
        assert_eq!(settings.database.url, "postgres://prod/db");
        assert_eq!(settings.application.name, "prod-app");
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_var_selects_memory_backend() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nbackend = \"postgres\"\n",
        )]);
        let mut env = layered_env(&temp_dir, None);
        env.set("CATALOG_DATABASE__BACKEND", "memory");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert!(settings.database.url.is_empty());
    }

    #[test]
    fn test_postgres_backend_without_url_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nport = 3000\n")]);
        let _env = layered_env(&temp_dir, None);

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "database.url"
        ));
    }

    #[test]
    fn test_builder_overrides_environment_and_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("staging.toml", "[server]\nport = 7000\n"),
            (
                "explicit.toml",
                "[server]\nport = 6000\n\n[database]\nbackend = \"memory\"\n",
            ),
        ]);
        let _env = layered_env(&temp_dir, Some("production"));

        let loader = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Staging);
        assert_eq!(loader.environment(), AppEnvironment::Staging);
        assert_eq!(loader.load().unwrap().server.port, 7000);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("explicit.toml"))
            .load()
            .expect("Should load");
        assert_eq!(settings.server.port, 6000);
        assert_eq!(settings.database.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_load_single_file_mode() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[(
            "single.toml",
            "[server]\nhost = \"0.0.0.0\"\nport = 5000\n\n[database]\nbackend = \"memory\"\n",
        )]);
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.set(
            CONFIG_FILE_ENV,
            temp_dir.path().join("single.toml").to_str().unwrap(),
        );

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.address(), "0.0.0.0:5000");
        assert_eq!(settings.database.backend, StorageBackend::Memory);
    }
}
