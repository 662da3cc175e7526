//! Configuration module for `UniPortal`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values.
const DIR_VARIABLE: &str = "$UNI_PORTAL";

/// Login delay used when neither the config file nor the defaults set one.
pub const FALLBACK_LOGIN_DELAY_MS: u64 = 500;

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated latency applied to every login attempt, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_delay_ms: Option<u64>,
}

/// Portal behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Semester label given to new student registrations
    #[serde(default)]
    pub registration_term: String,
    /// Author recorded on announcements posted without a signed-in name
    #[serde(default)]
    pub fallback_author: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Portal settings
    #[serde(default)]
    pub portal: PortalConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override simulated login delay
    pub login_delay_ms: Option<u64>,
    /// Override registration term label
    pub registration_term: Option<String>,
    /// Override fallback announcement author
    pub fallback_author: Option<String>,
}

impl Config {
    /// Get the `$UNI_PORTAL` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/uniportal`
    /// - macOS: `~/Library/Application Support/uniportal`
    /// - Windows: `%APPDATA%\uniportal`
    #[must_use]
    pub fn get_portal_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("uniportal")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or unset) here and set in `defaults` are
    /// copied, so upgrades pick up new keys without clobbering user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.auth.login_delay_ms.is_none() && defaults.auth.login_delay_ms.is_some() {
            self.auth.login_delay_ms = defaults.auth.login_delay_ms;
            changed = true;
        }

        if self.portal.registration_term.is_empty() && !defaults.portal.registration_term.is_empty()
        {
            self.portal
                .registration_term
                .clone_from(&defaults.portal.registration_term);
            changed = true;
        }
        if self.portal.fallback_author.is_empty() && !defaults.portal.fallback_author.is_empty() {
            self.portal
                .fallback_author
                .clone_from(&defaults.portal.fallback_author);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; nothing is written back to disk.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(delay) = overrides.login_delay_ms {
            self.auth.login_delay_ms = Some(delay);
        }

        if let Some(term) = &overrides.registration_term {
            self.portal.registration_term.clone_from(term);
        }
        if let Some(author) = &overrides.fallback_author {
            self.portal.fallback_author.clone_from(author);
        }
    }

    /// Effective login delay
    #[must_use]
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.auth.login_delay_ms.unwrap_or(FALLBACK_LOGIN_DELAY_MS))
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds and `dconfig.toml` for debug builds,
    /// inside [`get_portal_dir`].
    ///
    /// [`get_portal_dir`]: Self::get_portal_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_portal_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$UNI_PORTAL` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let portal_dir = Self::get_portal_dir();
            value.replace(DIR_VARIABLE, portal_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$UNI_PORTAL` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults
    ///   and save when anything was added.
    /// - First run: create the config directory and write the defaults.
    ///
    /// Falls back to defaults on any read or parse error.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if serialization fails, the directory cannot be
    /// created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Returns an error if serialization fails, the directory cannot be
    /// created, or the file cannot be written.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `login_delay_ms`,
    /// `registration_term`, `fallback_author` (dashes accepted in place of
    /// underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "login_delay_ms" | "login-delay-ms" => {
                Some(self.login_delay().as_millis().to_string())
            }
            "registration_term" | "registration-term" => {
                Some(self.portal.registration_term.clone())
            }
            "fallback_author" | "fallback-author" => Some(self.portal.fallback_author.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// (`verbose` takes `true`/`false`, `login_delay_ms` a non-negative integer).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "login_delay_ms" | "login-delay-ms" => {
                let delay = value.parse::<u64>().map_err(|_| {
                    format!("Invalid millisecond value for 'login_delay_ms': '{value}'")
                })?;
                self.auth.login_delay_ms = Some(delay);
            }
            "registration_term" | "registration-term" => {
                self.portal.registration_term = value.to_string();
            }
            "fallback_author" | "fallback-author" => {
                self.portal.fallback_author = value.to_string();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "login_delay_ms" | "login-delay-ms" => {
                self.auth.login_delay_ms = defaults.auth.login_delay_ms;
            }
            "registration_term" | "registration-term" => self
                .portal
                .registration_term
                .clone_from(&defaults.portal.registration_term),
            "fallback_author" | "fallback-author" => self
                .portal
                .fallback_author
                .clone_from(&defaults.portal.fallback_author),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds when the
    /// file is already absent.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[auth]")?;
        writeln!(f, "  login_delay_ms = {}", self.login_delay().as_millis())?;

        writeln!(f, "\n[portal]")?;
        writeln!(
            f,
            "  registration_term = \"{}\"",
            self.portal.registration_term
        )?;
        writeln!(f, "  fallback_author = \"{}\"", self.portal.fallback_author)?;

        Ok(())
    }
}
