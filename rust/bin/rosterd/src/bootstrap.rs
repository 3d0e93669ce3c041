//! Startup checks. `rosterd` refuses to start on a config it cannot honor.

use crate::config::ServerConfig;

/// Verify server configuration is ready for use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    config
        .password
        .params()
        .map_err(|e| anyhow::anyhow!("Invalid [password] section: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use staff::service::PasswordConfig;

    use super::*;
    use crate::config::StorageConfig;

    fn config(data_dir: &str, password: PasswordConfig) -> ServerConfig {
        ServerConfig {
            storage: StorageConfig {
                data_dir: data_dir.to_string(),
                sqlite_path: None,
            },
            password,
        }
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config("/tmp", PasswordConfig::default())).is_ok());
    }

    #[test]
    fn test_verify_config_empty_data_dir() {
        assert!(verify_config(&config("", PasswordConfig::default())).is_err());
    }

    #[test]
    fn test_verify_config_bad_cost() {
        let password = PasswordConfig {
            memory_kib: 4,
            iterations: 0,
            parallelism: 1,
        };
        assert!(verify_config(&config("/tmp", password)).is_err());
    }
}
