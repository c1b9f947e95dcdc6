//! Config command handler

use super::StartupError;
use crate::args::ConfigSubcommand;
use std::io::{self, BufRead, Write};
use uni_grades::config::Config;

/// Dispatch config subcommands
///
/// # Errors
/// Returns an error for unknown keys, invalid values, or when the config
/// file cannot be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), StartupError> {
    match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).map_err(StartupError::Config)?;
            persist(config)?;
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).map_err(StartupError::Config)?;
            persist(config)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(key) => match config.get(key) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{key}'"),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
}

fn persist(config: &Config) -> Result<(), StartupError> {
    config
        .save()
        .map_err(|e| StartupError::Config(format!("Failed to save config: {e}")))
}

fn confirmed(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Remove the user config file after a y/n confirmation read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), StartupError> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;

    if confirmed(&answer) {
        Config::reset()
            .map_err(|e| StartupError::Config(format!("Failed to reset config: {e}")))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed("y\n"));
        assert!(confirmed(" YES "));
        assert!(!confirmed("n"));
        assert!(!confirmed(""));
    }

    #[test]
    fn test_set_rejects_bad_value_before_saving() {
        let mut config = Config::from_defaults();
        let defaults = Config::from_defaults();
        let result = run(
            Some(ConfigSubcommand::Set {
                key: "coercion".to_string(),
                value: "sloppy".to_string(),
            }),
            &mut config,
            &defaults,
        );
        assert!(matches!(result, Err(StartupError::Config(_))));
        assert_eq!(config.dashboard.coercion, "lenient");
    }
}
