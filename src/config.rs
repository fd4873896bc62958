use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_FEEDBACK_DELAY_MS, DEFAULT_ROUND_SIZE};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub round_size: usize,
    pub feedback_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/vocab.sled"),
            round_size: env_or_parse("ROUND_SIZE", DEFAULT_ROUND_SIZE),
            feedback_delay_ms: env_or_parse("FEEDBACK_DELAY_MS", DEFAULT_FEEDBACK_DELAY_MS),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "RUST_LOG",
            "ENABLE_FILE_LOGS",
            "SLED_PATH",
            "ROUND_SIZE",
            "FEEDBACK_DELAY_MS",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.round_size, DEFAULT_ROUND_SIZE);
        assert_eq!(cfg.feedback_delay_ms, DEFAULT_FEEDBACK_DELAY_MS);
        assert!(!cfg.enable_file_logs);
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("ROUND_SIZE", "6");
        env::set_var("FEEDBACK_DELAY_MS", "250");

        let cfg = Config::from_env();
        assert_eq!(cfg.round_size, 6);
        assert_eq!(cfg.feedback_delay_ms, 250);
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("ROUND_SIZE", "bad");

        let cfg = Config::from_env();
        assert_eq!(cfg.round_size, DEFAULT_ROUND_SIZE);
    }
}
