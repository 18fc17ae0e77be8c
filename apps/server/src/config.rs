//! Server configuration module.
//!
//! Configuration is loaded from environment variables (optionally seeded
//! from a `.env` file) with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use kidspos_core::apk::DEFAULT_MAX_APK_SIZE;

/// Receipt printer endpoint. Carried for the register app; the server does
/// not talk to the printer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    pub host: String,
    pub port: u16,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,

    /// HTTP listen port
    pub port: u16,

    pub receipt_printer: PrinterConfig,

    /// Edge length of generated QR codes in pixels
    pub qr_code_size: u32,

    /// Client address prefix considered local
    pub allowed_ip_prefix: String,

    pub encryption_key: String,

    /// Directory holding uploaded APK files
    pub apk_upload_dir: PathBuf,

    /// Largest accepted APK upload in bytes (default: 100 MiB)
    pub apk_max_file_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("./kidspos.db"),
            port: 8080,
            receipt_printer: PrinterConfig {
                host: "localhost".to_string(),
                port: 9100,
            },
            qr_code_size: 200,
            allowed_ip_prefix: "192.168.".to_string(),
            encryption_key: "DefaultKidsPOSKey123!@#".to_string(),
            apk_upload_dir: PathBuf::from("./uploads/apk"),
            apk_max_file_size: DEFAULT_MAX_APK_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment win.
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let string = |name: &str, default: String| lookup(name).unwrap_or(default);

        let config = Config {
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            port: parse_var(&lookup, "PORT", defaults.port)?,

            receipt_printer: PrinterConfig {
                host: string("RECEIPT_PRINTER_HOST", defaults.receipt_printer.host),
                port: parse_var(&lookup, "RECEIPT_PRINTER_PORT", defaults.receipt_printer.port)?,
            },

            qr_code_size: parse_var(&lookup, "QR_CODE_SIZE", defaults.qr_code_size)?,

            allowed_ip_prefix: string("ALLOWED_IP_PREFIX", defaults.allowed_ip_prefix),

            encryption_key: string("ENCRYPTION_KEY", defaults.encryption_key),

            apk_upload_dir: lookup("APK_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.apk_upload_dir),

            apk_max_file_size: parse_var(&lookup, "APK_MAX_FILE_SIZE", defaults.apk_max_file_size)?,
        };

        if config.apk_max_file_size == 0 {
            return Err(ConfigError::InvalidValue("APK_MAX_FILE_SIZE".to_string()));
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("./kidspos.db"));
        assert_eq!(config.receipt_printer.port, 9100);
        assert_eq!(config.qr_code_size, 200);
        assert_eq!(config.apk_max_file_size, 104_857_600);
        assert_eq!(config.apk_upload_dir, PathBuf::from("./uploads/apk"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("DATABASE_PATH", "/data/pos.db"),
            ("RECEIPT_PRINTER_HOST", "printer.local"),
            ("APK_MAX_FILE_SIZE", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/data/pos.db"));
        assert_eq!(config.receipt_printer.host, "printer.local");
        assert_eq!(config.apk_max_file_size, 2048);
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        assert!(Config::from_lookup(lookup(&[("APK_MAX_FILE_SIZE", "0")])).is_err());
    }
}
