//! CLI argument definitions for `uniportal`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use uni_portal::config::ConfigOverrides;
use uni_portal::core::metrics::ALL_SEMESTERS;
use uni_portal::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `login_delay_ms`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Email and password for commands that act as a signed-in user
#[derive(Debug, Clone, clap::Args)]
pub struct Credentials {
    /// Account email (e.g., `admin@university.edu`)
    #[arg(long, value_name = "EMAIL")]
    pub email: String,
    /// Account password
    #[arg(long, value_name = "PASSWORD")]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List the course catalog.
    Courses {
        /// Only show courses whose code contains TERM (case-insensitive)
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Match the search term against name and department as well
        #[arg(long)]
        all_fields: bool,
    },
    /// Sign in and show the admin or student dashboard.
    Dashboard {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Sign in as a student and show results with semester GPA.
    Results {
        #[command(flatten)]
        credentials: Credentials,

        /// Semester label to filter by, or `all`
        #[arg(long, value_name = "LABEL", default_value = ALL_SEMESTERS)]
        semester: String,
    },
    /// List announcements, newest first.
    Announcements,
    /// Print the seeded data store as TOML.
    Snapshot,
    /// Start an interactive session.
    ///
    /// Reads one command per line from stdin against a single portal.
    /// Type `help` inside the shell for the command list.
    Shell,
}

#[derive(Parser, Debug)]
#[command(
    name = "uniportal",
    about = "Academic records portal command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the simulated login delay in milliseconds
    #[arg(long = "login-delay-ms", value_name = "MS")]
    pub login_delay_ms: Option<u64>,

    /// Override the semester label given to new registrations
    #[arg(long = "registration-term", value_name = "LABEL")]
    pub registration_term: Option<String>,

    /// Override the author used for announcements posted without a name
    #[arg(long = "fallback-author", value_name = "NAME")]
    pub fallback_author: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            login_delay_ms: self.login_delay_ms,
            registration_term: self.registration_term.clone(),
            fallback_author: self.fallback_author.clone(),
        }
    }
}
