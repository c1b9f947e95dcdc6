//! Configuration module for `UniGrades`

use crate::core::models::{Institution, Institutions, Rgb};
use crate::core::render::RenderSettings;
use crate::core::statistics::CoercionPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Environment variable holding the course store connection string.
pub const STORE_URI_ENV: &str = "UNIGRADES_STORE_URI";

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

/// Dashboard chart and statistics configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Credits needed for the degree (progress bar ceiling)
    #[serde(default)]
    pub credit_target: f64,
    /// Fixed axis maximum of the grades-per-year chart
    #[serde(default)]
    pub grade_axis_max: f64,
    /// Fixed axis maximum of the credits-per-year chart
    #[serde(default)]
    pub credit_axis_max: f64,
    /// Handling of malformed numeric fields (lenient, strict)
    #[serde(default)]
    pub coercion: String,
}

/// One selectable institution as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionConfig {
    /// Display name
    pub name: String,
    /// Brand color as `#rrggbb`
    pub color: String,
    /// Whether course data exists for this institution
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Institutions offered by the picker
    #[serde(default)]
    pub institutions: Vec<InstitutionConfig>,
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
}

impl Config {
    /// Get the `$UNI_GRADES` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/unigrades`
    /// - macOS: `~/Library/Application Support/unigrades`
    /// - Windows: `%APPDATA%\unigrades`
    #[must_use]
    pub fn get_unigrades_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("unigrades")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) in the current config and set in
    /// `defaults` are updated, so upgrading picks up new settings while keeping
    /// user edits.
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

        let dashboard = &mut self.dashboard;
        for (value, default) in [
            (&mut dashboard.credit_target, defaults.dashboard.credit_target),
            (&mut dashboard.grade_axis_max, defaults.dashboard.grade_axis_max),
            (&mut dashboard.credit_axis_max, defaults.dashboard.credit_axis_max),
        ] {
            if *value <= 0.0 && default > 0.0 {
                *value = default;
                changed = true;
            }
        }
        if dashboard.coercion.is_empty() && !defaults.dashboard.coercion.is_empty() {
            dashboard.coercion.clone_from(&defaults.dashboard.coercion);
            changed = true;
        }

        if self.institutions.is_empty() && !defaults.institutions.is_empty() {
            self.institutions.clone_from(&defaults.institutions);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file itself is
    /// left untouched.
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
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_unigrades_dir`].
    ///
    /// [`get_unigrades_dir`]: Self::get_unigrades_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_unigrades_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$UNI_GRADES` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$UNI_GRADES") {
            let dir = Self::get_unigrades_dir();
            value.replace("$UNI_GRADES", dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults (empty strings, zero, false).
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
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary, so this indicates a packaging bug.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged from defaults (and is saved
    /// back when that changed anything). On first run the defaults are written
    /// out. Any read or parse failure falls back to defaults.
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

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `credit_target`,
    /// `grade_axis_max`, `credit_axis_max`, `coercion`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "credit_target" | "credit-target" => Some(self.dashboard.credit_target.to_string()),
            "grade_axis_max" | "grade-axis-max" => {
                Some(self.dashboard.grade_axis_max.to_string())
            }
            "credit_axis_max" | "credit-axis-max" => {
                Some(self.dashboard.credit_axis_max.to_string())
            }
            "coercion" => Some(self.dashboard.coercion.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if crate::logger::Level::parse(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "credit_target" | "credit-target" => {
                self.dashboard.credit_target = parse_positive(key, value)?;
            }
            "grade_axis_max" | "grade-axis-max" => {
                self.dashboard.grade_axis_max = parse_positive(key, value)?;
            }
            "credit_axis_max" | "credit-axis-max" => {
                self.dashboard.credit_axis_max = parse_positive(key, value)?;
            }
            "coercion" => {
                let policy: CoercionPolicy = value.parse()?;
                self.dashboard.coercion = policy.to_string();
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
            "credit_target" | "credit-target" => {
                self.dashboard.credit_target = defaults.dashboard.credit_target;
            }
            "grade_axis_max" | "grade-axis-max" => {
                self.dashboard.grade_axis_max = defaults.dashboard.grade_axis_max;
            }
            "credit_axis_max" | "credit-axis-max" => {
                self.dashboard.credit_axis_max = defaults.dashboard.credit_axis_max;
            }
            "coercion" => self
                .dashboard
                .coercion
                .clone_from(&defaults.dashboard.coercion),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it from defaults. Succeeds when no file exists.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Build the immutable institution set used by the picker and renderer.
    ///
    /// # Errors
    /// Returns an error if the list is empty or a color is not `#rrggbb`.
    pub fn institutions(&self) -> Result<Institutions, String> {
        let list = self
            .institutions
            .iter()
            .map(|entry| {
                let color = Rgb::from_hex(&entry.color).ok_or_else(|| {
                    format!("Invalid color '{}' for institution '{}'", entry.color, entry.name)
                })?;
                Ok(Institution::new(&entry.name, color, entry.available))
            })
            .collect::<Result<Vec<_>, String>>()?;
        Institutions::new(list)
    }

    /// Build the renderer settings for this session.
    ///
    /// # Errors
    /// Returns an error if the coercion policy name is unknown.
    pub fn render_settings(&self) -> Result<RenderSettings, String> {
        let coercion = if self.dashboard.coercion.is_empty() {
            CoercionPolicy::default()
        } else {
            self.dashboard.coercion.parse()?
        };
        let fallback = RenderSettings::default();
        let positive_or = |value: f64, default: f64| if value > 0.0 { value } else { default };
        Ok(RenderSettings {
            credit_target: positive_or(self.dashboard.credit_target, fallback.credit_target),
            grade_axis_max: positive_or(self.dashboard.grade_axis_max, fallback.grade_axis_max),
            credit_axis_max: positive_or(self.dashboard.credit_axis_max, fallback.credit_axis_max),
            coercion,
        })
    }
}

fn parse_positive(key: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed > 0.0)
        .ok_or_else(|| format!("Invalid value for '{key}': '{value}' (expected a positive number)"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[dashboard]")?;
        writeln!(f, "  credit_target = {}", self.dashboard.credit_target)?;
        writeln!(f, "  grade_axis_max = {}", self.dashboard.grade_axis_max)?;
        writeln!(f, "  credit_axis_max = {}", self.dashboard.credit_axis_max)?;
        writeln!(f, "  coercion = \"{}\"", self.dashboard.coercion)?;

        for institution in &self.institutions {
            writeln!(f, "\n[[institutions]]")?;
            writeln!(f, "  name = \"{}\"", institution.name)?;
            writeln!(f, "  color = \"{}\"", institution.color)?;
            writeln!(f, "  available = {}", institution.available)?;
        }

        Ok(())
    }
}
