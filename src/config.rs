use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::LanguagePair;

pub const CONFIG_FILE_NAME: &str = ".xlfsyncrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Twig views, relative to the project root.
    #[serde(default = "default_views_dir", alias = "twigDir")]
    pub views_dir: String,
    /// XLIFF files, relative to the project root.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_language")]
    pub source_language: String,
    #[serde(default = "default_language")]
    pub target_language: String,
    /// Glob patterns, relative to the views directory, of the files to scan.
    #[serde(default = "default_templates")]
    pub templates: Vec<String>,
}

fn default_views_dir() -> String {
    "views".to_string()
}

fn default_locales_dir() -> String {
    "locales".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_templates() -> Vec<String> {
    vec!["**/*".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            views_dir: default_views_dir(),
            locales_dir: default_locales_dir(),
            source_language: default_language(),
            target_language: default_language(),
            templates: default_templates(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a language is blank or a template pattern is not
    /// a valid glob.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() || self.target_language.trim().is_empty() {
            bail!("'sourceLanguage' and 'targetLanguage' must not be empty");
        }
        self.template_patterns()?;
        Ok(())
    }

    pub fn template_patterns(&self) -> Result<Vec<Pattern>> {
        self.templates
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'templates': \"{}\"", pattern))
            })
            .collect()
    }

    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(self.source_language.trim(), self.target_language.trim())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load `.xlfsyncrc.json` from the project root, falling back to defaults.
pub fn load_config(project_root: &Path) -> Result<ConfigLoadResult> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
