//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Optional path to a grading config JSON document.
    pub grading_config_path: Option<String>,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default, so loading never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "function-tester".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "function_tester=info".into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "function_tester.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            grading_config_path: env::var("GRADING_CONFIG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        }
    }

    fn lock() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// A poisoned lock is recovered, since the config holds plain values only.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        Self::lock()
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        AppConfig::set_field(|cfg| *cfg = AppConfig::from_env());
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = Self::lock()
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_dir = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_grading_config_path(value: Option<String>) {
        AppConfig::set_field(|cfg| cfg.grading_config_path = value);
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_dir() -> String {
    AppConfig::global().log_dir.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn grading_config_path() -> Option<String> {
    AppConfig::global().grading_config_path.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "PROJECT_NAME",
            "LOG_LEVEL",
            "LOG_DIR",
            "LOG_FILE",
            "LOG_TO_STDOUT",
            "GRADING_CONFIG_PATH",
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_env_is_empty() {
        clear_env();
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.project_name, "function-tester");
        assert_eq!(cfg.log_level, "function_tester=info");
        assert_eq!(cfg.log_dir, "logs");
        assert!(!cfg.log_to_stdout);
        assert!(cfg.grading_config_path.is_none());
    }

    #[test]
    #[serial]
    fn env_values_override_defaults() {
        clear_env();
        unsafe {
            env::set_var("LOG_TO_STDOUT", "true");
            env::set_var("GRADING_CONFIG_PATH", "/tmp/grading.json");
            env::set_var("PROJECT_NAME", "grader");
        }
        let cfg = AppConfig::from_env();
        assert!(cfg.log_to_stdout);
        assert_eq!(cfg.grading_config_path.as_deref(), Some("/tmp/grading.json"));
        assert_eq!(cfg.project_name, "grader");
        clear_env();
    }

    #[test]
    #[serial]
    fn blank_grading_path_is_ignored() {
        clear_env();
        unsafe {
            env::set_var("GRADING_CONFIG_PATH", "   ");
        }
        assert!(AppConfig::from_env().grading_config_path.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn setters_and_reset() {
        clear_env();
        AppConfig::reset();
        AppConfig::set_log_level("debug");
        AppConfig::set_log_to_stdout(true);
        assert_eq!(log_level(), "debug");
        assert!(log_to_stdout());

        AppConfig::reset();
        assert_eq!(log_level(), "function_tester=info");
        assert!(!log_to_stdout());
    }
}
