use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// CLI settings: defaults, then `solar-calc.toml` in the working directory,
/// then `SOLAR_CALC__*` environment variables. Command-line flags win over
/// all of these.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Default output format (json, table, csv, minimal)
    pub output: String,
    /// Report language for exports (ko, en)
    pub language: String,
    /// Directory holding remembered form values
    pub store_dir: PathBuf,
    /// Page that share links point at
    pub share_base_url: Option<String>,
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("solar-calc")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("output", "json")?
            .set_default("language", "ko")?
            .set_default("store_dir", default_store_dir().to_string_lossy().into_owned())?
            .set_default("log_level", "warn")?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("SOLAR_CALC").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

fn default_store_dir() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".solar-calc"),
        None => PathBuf::from(".solar-calc"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("definitely-not-a-settings-file").unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(settings.store_dir.ends_with(".solar-calc"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "language = \"en\"\nshare_base_url = \"https://calc.example.com/\"\n",
        )
        .unwrap();
        let stem = dir.path().join("custom");
        let settings = Settings::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(settings.language, "en");
        assert_eq!(
            settings.share_base_url.as_deref(),
            Some("https://calc.example.com/")
        );
    }
}
