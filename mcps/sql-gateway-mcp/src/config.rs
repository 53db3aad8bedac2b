//! Configuration for the SQL gateway

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Always opened read-only.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// How long to wait on a locked database before failing
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("sqluniversity.db")
}

fn default_busy_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum rows materialized per query; extra rows are dropped
    #[serde(default = "default_max_rows")]
    pub max_return_rows: usize,
}

fn default_max_rows() -> usize {
    5000
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_return_rows: default_max_rows(),
        }
    }
}

/// Schema document options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Attach per-column value profiles to the schema document
    #[serde(default)]
    pub profile_values: bool,

    /// Sample size for high-cardinality columns
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Columns with at most this many distinct values are fully enumerated
    #[serde(default = "default_low_cardinality")]
    pub low_cardinality_threshold: usize,

    /// Tables larger than this are never profiled
    #[serde(default = "default_max_profile_rows")]
    pub max_profile_rows: i64,
}

fn default_sample_limit() -> usize {
    5
}

fn default_low_cardinality() -> usize {
    25
}

fn default_max_profile_rows() -> i64 {
    200_000
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            profile_values: false,
            sample_limit: default_sample_limit(),
            low_cardinality_threshold: default_low_cardinality(),
            max_profile_rows: default_max_profile_rows(),
        }
    }
}

impl GatewayConfig {
    /// Create a default config pointing to a specific database
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseConfig {
                path: path.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, GatewayError> {
        let config: Self =
            toml::from_str(content).map_err(|e| GatewayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self, GatewayError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from standard file locations
    ///
    /// Config is searched in order:
    /// 1. `SQL_GATEWAY_CONFIG_PATH` env var
    /// 2. `~/.binks/sql-gateway.toml`
    /// 3. `./sql-gateway.toml`
    /// 4. `$XDG_CONFIG_HOME/sql-gateway-mcp/config.toml`
    /// 5. Default config if none found
    pub fn load() -> Self {
        let env_path = std::env::var_os("SQL_GATEWAY_CONFIG_PATH").map(PathBuf::from);

        let mut config_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            config_paths.push(home.join(".binks").join("sql-gateway.toml"));
        }

        config_paths.push(PathBuf::from("sql-gateway.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("sql-gateway-mcp").join("config.toml"));
        }

        Self::load_from(env_path.as_deref(), &config_paths)
    }

    /// First loadable config among an explicit path and the search paths
    ///
    /// Missing or broken files are logged and skipped, never fatal.
    pub fn load_from(env_path: Option<&Path>, config_paths: &[PathBuf]) -> Self {
        if let Some(path) = env_path {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        tracing::info!(
                            "Loaded config from SQL_GATEWAY_CONFIG_PATH={}",
                            path.display()
                        );
                        return config;
                    }
                    Err(e) => tracing::warn!("Ignoring SQL_GATEWAY_CONFIG_PATH: {}", e),
                }
            } else {
                tracing::warn!("SQL_GATEWAY_CONFIG_PATH={} does not exist", path.display());
            }
        }

        for path in config_paths.iter().filter(|p| p.exists()) {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Failed to load config: {}", e),
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.limits.max_return_rows == 0 {
            return Err(GatewayError::Config(
                "limits.max_return_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.database.path, PathBuf::from("sqluniversity.db"));
        assert_eq!(config.limits.max_return_rows, 5000);
        assert!(!config.schema.profile_values);
        assert_eq!(config.schema.sample_limit, 5);
        assert_eq!(config.schema.low_cardinality_threshold, 25);
        assert_eq!(config.schema.max_profile_rows, 200_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GatewayConfig::from_toml(
            r#"
            [database]
            path = "/data/university.db"

            [schema]
            profile_values = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/data/university.db"));
        assert_eq!(config.database.busy_timeout_secs, 30);
        assert_eq!(config.limits.max_return_rows, 5000);
        assert!(config.schema.profile_values);
        assert_eq!(config.schema.low_cardinality_threshold, 25);
    }

    #[test]
    fn test_zero_row_cap_rejected() {
        let err = GatewayConfig::from_toml("[limits]\nmax_return_rows = 0").unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(GatewayConfig::from_toml("[limits\nmax_return_rows = 1").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sql-gateway.toml");
        std::fs::write(&path, "[limits]\nmax_return_rows = 10\n").unwrap();

        let config = GatewayConfig::from_file(&path).unwrap();
        assert_eq!(config.limits.max_return_rows, 10);
    }

    #[test]
    fn test_broken_env_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[limits\nmax_return_rows = ").unwrap();

        let config = GatewayConfig::load_from(Some(broken.as_path()), &[]);
        assert_eq!(config.limits.max_return_rows, 5000);

        let missing = dir.path().join("missing.toml");
        let config = GatewayConfig::load_from(Some(missing.as_path()), &[]);
        assert_eq!(config.database.path, PathBuf::from("sqluniversity.db"));
    }

    #[test]
    fn test_search_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[limits]\nmax_return_rows = 0\n").unwrap();
        std::fs::write(&good, "[limits]\nmax_return_rows = 7\n").unwrap();

        let config = GatewayConfig::load_from(None, &[dir.path().join("absent.toml"), broken, good]);
        assert_eq!(config.limits.max_return_rows, 7);
    }

    #[test]
    fn test_env_config_wins_over_search_paths() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join("env.toml");
        let search = dir.path().join("search.toml");
        std::fs::write(&env, "[limits]\nmax_return_rows = 3\n").unwrap();
        std::fs::write(&search, "[limits]\nmax_return_rows = 9\n").unwrap();

        let config = GatewayConfig::load_from(Some(env.as_path()), &[search]);
        assert_eq!(config.limits.max_return_rows, 3);
    }

    #[test]
    fn test_with_database() {
        let config = GatewayConfig::with_database("/tmp/x.db");
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.limits.max_return_rows, 5000);
    }
}
