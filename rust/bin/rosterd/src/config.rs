//! Server-side configuration, read from a TOML file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/roster"
//!
//! [password]
//! memory_kib = 19456
//! iterations = 2
//! parallelism = 1
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use staff::service::PasswordConfig;

/// Directory holding named server configs (`rosterd -c <name>`).
const CONFIG_DIR: &str = "/etc/roster";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,

    /// Argon2 cost for newly hashed passwords.
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the SQLite database.
    pub data_dir: String,

    /// Defaults to `{data_dir}/staff.sqlite`.
    #[serde(default)]
    pub sqlite_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| Path::new(&self.data_dir).join("staff.sqlite"))
    }
}

impl ServerConfig {
    /// Resolve `-c` to a file: a bare context name maps to
    /// `/etc/roster/<name>.toml`, anything with `/` or a `.toml` suffix is a path.
    pub fn resolve_path(name: &str) -> PathBuf {
        if name.contains('/') || name.ends_with(".toml") {
            PathBuf::from(name)
        } else {
            Path::new(CONFIG_DIR).join(format!("{}.toml", name))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/roster/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./dev.toml"),
            PathBuf::from("./dev.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/tmp/roster/x.toml"),
            PathBuf::from("/tmp/roster/x.toml")
        );
    }

    #[test]
    fn test_parse_minimal() {
        let config = ServerConfig::parse("[storage]\ndata_dir = \"/data\"\n").unwrap();
        assert_eq!(config.storage.data_dir, "/data");
        assert_eq!(
            config.storage.resolve_sqlite_path(),
            PathBuf::from("/data/staff.sqlite")
        );
        assert_eq!(config.password.memory_kib, 19 * 1024);
        assert_eq!(config.password.iterations, 2);
    }

    #[test]
    fn test_parse_full() {
        let config = ServerConfig::parse(
            r#"
            [storage]
            data_dir = "/data"
            sqlite_path = "/elsewhere/roster.db"

            [password]
            memory_kib = 65536
            iterations = 3
            "#,
        )
        .unwrap();
        assert_eq!(
            config.storage.resolve_sqlite_path(),
            PathBuf::from("/elsewhere/roster.db")
        );
        assert_eq!(config.password.memory_kib, 65536);
        assert_eq!(config.password.iterations, 3);
        assert_eq!(config.password.parallelism, 1);
    }

    #[test]
    fn test_missing_storage_section() {
        assert!(ServerConfig::parse("[password]\niterations = 1\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/srv\"\n").unwrap();
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/srv");

        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
