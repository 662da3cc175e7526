//! Command-line interface entry point for `uniportal`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use uni_portal::config::Config;
use uni_portal::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use uni_portal::{info, Portal};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    if let Err(e) = dispatch(args.command, &mut config, &defaults) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command, config: &mut Config, defaults: &Config) -> Result<(), String> {
    if let Command::Config { subcommand } = command {
        return commands::config::run(subcommand, config, defaults);
    }

    let mut portal = Portal::new(config.clone());
    match command {
        Command::Config { .. } => Ok(()),
        Command::Courses { search, all_fields } => {
            commands::views::run_courses(&portal.data, search.as_deref(), all_fields);
            Ok(())
        }
        Command::Dashboard { credentials } => {
            commands::dashboard::run_dashboard(&mut portal, &credentials)
        }
        Command::Results {
            credentials,
            semester,
        } => commands::dashboard::run_results(&mut portal, &credentials, &semester),
        Command::Announcements => {
            commands::views::run_announcements(&portal.data);
            Ok(())
        }
        Command::Snapshot => commands::views::run_snapshot(&portal.data),
        Command::Shell => {
            commands::shell::run(portal);
            Ok(())
        }
    }
}
