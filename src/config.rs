use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub port: u16,

    // Storage
    pub storage_dir: PathBuf,
    pub max_upload_mb: usize,

    // Error mapping
    pub internal_errors_as_server_errors: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match std::env::var("PORT") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got '{}'", v))?,
                Err(_) => 8080,
            },

            // Storage - each request gets its own directory under this root
            storage_dir: std::env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("xliff-converter")),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),

            // Error mapping - false keeps every failure a 400
            internal_errors_as_server_errors: std::env::var("INTERNAL_ERRORS_AS_SERVER_ERRORS")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }

    /// Request body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// `address:port` to bind the listener to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "BIND_ADDRESS",
        "PORT",
        "STORAGE_DIR",
        "MAX_UPLOAD_MB",
        "INTERNAL_ERRORS_AS_SERVER_ERRORS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load defaults");

        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_dir, std::env::temp_dir().join("xliff-converter"));
        assert_eq!(config.max_upload_mb, 100);
        assert!(!config.internal_errors_as_server_errors);
        assert_eq!(config.listen_address(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("BIND_ADDRESS", "127.0.0.1");
        std::env::set_var("PORT", "9090");
        std::env::set_var("STORAGE_DIR", "/var/lib/xliff");
        std::env::set_var("MAX_UPLOAD_MB", "5");
        std::env::set_var("INTERNAL_ERRORS_AS_SERVER_ERRORS", "TRUE");

        let config = Config::from_env().expect("Should load overrides");
        clear_env();

        assert_eq!(config.listen_address(), "127.0.0.1:9090");
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/xliff"));
        assert_eq!(config.max_upload_bytes(), 5 * 1024 * 1024);
        assert!(config.internal_errors_as_server_errors);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    #[serial]
    fn test_invalid_upload_limit_falls_back() {
        clear_env();
        std::env::set_var("MAX_UPLOAD_MB", "lots");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.max_upload_mb, 100);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(parse_flag("On"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
