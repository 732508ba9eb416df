use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";
pub const ENV_PREFIX: &str = "WHALE_STATS_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration by layering a TOML file, environment variables,
    /// an optional JSON sidecar and the built-in defaults.
    ///
    /// The sidecar sits next to the TOML file with a `.json` extension
    /// (`config/Config.toml` -> `config/Config.json`) and only fills keys the
    /// TOML file and environment leave unset. Missing files are skipped;
    /// nested keys in the environment use `__`
    /// (e.g. `WHALE_STATS_ANALYSIS__ROLLING_WINDOW=14`).
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or a value has the wrong type.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::layered(Figment::new().merge(Toml::file(path)), path)
            .extract()?;

        tracing::debug!(path, "configuration loaded");
        Ok(config)
    }

    /// Loads configuration with a profile overlay (`config/Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let files = Figment::new()
            .merge(Toml::file(DEFAULT_CONFIG_PATH))
            .merge(Toml::file(format!("config/Config.{profile}.toml")));
        let config: AppConfig = Self::layered(files, DEFAULT_CONFIG_PATH).extract()?;

        tracing::debug!(profile, "configuration loaded with profile");
        Ok(config)
    }

    /// JSON sidecar location for a TOML config path.
    #[must_use]
    pub fn sidecar_path(path: &str) -> PathBuf {
        Path::new(path).with_extension("json")
    }

    fn layered(files: Figment, path: &str) -> Figment {
        files
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(Self::sidecar_path(path)))
            .join(Serialized::defaults(AppConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ANOMALY_THRESHOLD, DEFAULT_ROLLING_WINDOW};
    use figment::Jail;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.analysis.rolling_window, DEFAULT_ROLLING_WINDOW);
            Ok(())
        });
    }

    #[test]
    fn toml_overrides_defaults_and_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
                [analysis]
                rolling_window = 14
                anomaly_threshold = 2.5

                [output]
                format = "json"
                "#,
            )?;
            jail.set_env("WHALE_STATS_ANALYSIS__ROLLING_WINDOW", "30");

            let config = ConfigLoader::load_from("Config.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.analysis.rolling_window, 30);
            assert!((config.analysis.anomaly_threshold - 2.5).abs() < f64::EPSILON);
            assert_eq!(config.output.format, "json");
            assert_eq!(config.analysis.event_offsets_days, vec![1, 3, 7]);
            Ok(())
        });
    }

    #[test]
    fn profile_overlay_applies_after_base_file() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                "[analysis]\nanomaly_threshold = 4.0\nrolling_window = 10\n",
            )?;
            jail.create_file(
                "config/Config.research.toml",
                "[analysis]\nanomaly_threshold = 2.0\n",
            )?;

            let config = ConfigLoader::load_with_profile("research").map_err(|e| e.to_string())?;
            assert!((config.analysis.anomaly_threshold - 2.0).abs() < f64::EPSILON);
            assert_eq!(config.analysis.rolling_window, 10);
            assert!(config.analysis.anomaly_threshold < DEFAULT_ANOMALY_THRESHOLD);
            Ok(())
        });
    }

    #[test]
    fn sidecar_follows_the_toml_path() {
        assert_eq!(
            ConfigLoader::sidecar_path(DEFAULT_CONFIG_PATH),
            Path::new("config/Config.json")
        );

        Jail::expect_with(|jail| {
            jail.create_dir("custom")?;
            jail.create_file("custom/whale.toml", "[analysis]\nrolling_window = 21\n")?;
            jail.create_file(
                "custom/whale.json",
                r#"{"analysis": {"rolling_window": 5, "anomaly_threshold": 2.0}}"#,
            )?;
            jail.create_dir("config")?;
            jail.create_file("config/Config.json", r#"{"output": {"format": "json"}}"#)?;

            let config = ConfigLoader::load_from("custom/whale.toml").map_err(|e| e.to_string())?;
            // TOML wins over the sidecar; the sidecar fills what TOML leaves out
            assert_eq!(config.analysis.rolling_window, 21);
            assert!((config.analysis.anomaly_threshold - 2.0).abs() < f64::EPSILON);
            // the default-location sidecar is not read for a custom path
            assert_eq!(config.output.format, "text");
            Ok(())
        });
    }
}
