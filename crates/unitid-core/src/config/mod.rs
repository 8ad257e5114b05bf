use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub labels: LabelConfig,
    pub logging: LoggingConfig,
}

/// Suffixes used when rendering unit ids as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub century: String,
    /// Shown instead of a decade label for the first decade of a century.
    pub century_start: String,
    pub decade: String,
    /// Appended to the first year of a decade in brief form.
    pub decade_brief: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            century: "世纪".to_string(),
            century_start: "世纪初".to_string(),
            decade: "年代".to_string(),
            decade_brief: "代".to_string(),
            year: "年".to_string(),
            month: "月".to_string(),
            day: "日".to_string(),
            hour: "时".to_string(),
            minute: "分".to_string(),
            second: "秒".to_string(),
        }
    }
}

impl LabelConfig {
    /// ## Summary
    /// Checks that every suffix is non-empty.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first empty suffix.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("century", &self.century),
            ("century_start", &self.century_start),
            ("decade", &self.decade),
            ("decade_brief", &self.decade_brief),
            ("year", &self.year),
            ("month", &self.month),
            ("day", &self.day),
            ("hour", &self.hour),
            ("minute", &self.minute),
            ("second", &self.second),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CoreError::ValidationError(format!(
                "label `{name}` must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `unitid.toml` file into a `Settings`.
    ///
    /// Variables use the `UNITID_` prefix and `__` between nested keys,
    /// e.g. `UNITID_LOGGING__LEVEL=debug`. The TOML file takes precedence
    /// over the environment.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if building or deserializing the
    /// configuration fails, and `CoreError::ValidationError` for an empty
    /// label.
    pub fn load() -> CoreResult<Self> {
        let builder = Self::defaults()?
            .add_source(
                config::Environment::with_prefix("UNITID")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("unitid").required(false));

        Self::finish(builder)
    }

    /// ## Summary
    /// Builds `Settings` from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the text is not valid TOML or does
    /// not deserialize into `Settings`, and `CoreError::ValidationError` for
    /// an empty label.
    pub fn from_toml(text: &str) -> CoreResult<Self> {
        Self::finish(
            Self::defaults()?.add_source(config::File::from_str(text, FileFormat::Toml)),
        )
    }

    fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
        Config::builder()
            .set_default("logging.level", "info")
            .map_err(config_error)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> CoreResult<Self> {
        let settings = builder
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(config_error)?;

        settings.labels.validate()?;
        Ok(settings)
    }
}

fn config_error(err: config::ConfigError) -> CoreError {
    CoreError::ConfigError(err.to_string())
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests;
