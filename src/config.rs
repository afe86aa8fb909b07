// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::{ClientError, Result};
use crate::models::{Language, TestCase};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload";
pub const DEFAULT_EVALUATE_PATH: &str = "/api/evaluate";

/// Where the evaluation service lives and what the form starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub upload_path: String,
    pub evaluate_path: String,
    pub default_language: Language,
}

/// On-disk form of [`ClientConfig`]; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base: Option<String>,
    upload_path: Option<String>,
    evaluate_path: Option<String>,
    language: Option<Language>,
}

/// A TOML file of test cases:
///
/// ```toml
/// [[test_cases]]
/// function_call = "fibonacci(5)"
/// expected = "5"
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct TestCaseFile {
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            evaluate_path: DEFAULT_EVALUATE_PATH.to_string(),
            default_language: Language::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overlaid with the config file (if any), overlaid with the
    /// environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`ClientConfig::load`] reading variables through `env`.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let explicit = env("CODESCORE_CONFIG").map(PathBuf::from);
        let path = explicit
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("codescore").join("config.toml")));

        if let Some(path) = path {
            if path.exists() {
                log::debug!("Loading config file {}", path.display());
                config.apply_file(&path)?;
            } else if explicit.is_some() {
                return Err(ClientError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
        }
        config.apply_env(&env)?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge(toml::from_str(contents)?);
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)?;
        self.merge(toml::from_str(&contents)?);
        Ok(())
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(api_base) = file.api_base {
            self.api_base = api_base;
        }
        if let Some(upload_path) = file.upload_path {
            self.upload_path = upload_path;
        }
        if let Some(evaluate_path) = file.evaluate_path {
            self.evaluate_path = evaluate_path;
        }
        if let Some(language) = file.language {
            self.default_language = language;
        }
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(api_base) = env("CODESCORE_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(upload_path) = env("CODESCORE_UPLOAD_PATH") {
            self.upload_path = upload_path;
        }
        if let Some(evaluate_path) = env("CODESCORE_EVALUATE_PATH") {
            self.evaluate_path = evaluate_path;
        }
        if let Some(language) = env("CODESCORE_LANGUAGE") {
            self.default_language = language.parse()?;
        }
        Ok(())
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.api_base, &self.upload_path)
    }

    pub fn evaluate_url(&self) -> String {
        join_url(&self.api_base, &self.evaluate_path)
    }
}

impl TestCaseFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
