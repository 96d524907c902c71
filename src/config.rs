//! Configuration for the document outliner.
//!
//! Supports both environment variables and YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{OutlineError, Result};
use crate::fallback::FallbackMode;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// LLM configuration, used only by the optional ToC repair pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the LLM API (e.g., "https://api.openai.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Model name (e.g., "gpt-4", "claude-3-opus")
    pub model: String,

    /// Maximum tokens for response (optional)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for generation (optional)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.0
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: String::new(),
            model: "claude-latest".to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Structure-extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Look for a table of contents before falling back.
    pub use_toc: bool,

    /// Entries nested deeper than this are dropped. 0 selects
    /// [`crate::section::DEFAULT_MAX_DEPTH`].
    pub max_depth: usize,

    /// Number of leading pages scanned for a ToC. 0 means 8.
    pub toc_page_scan_budget: usize,

    /// Segmentation strategy when no ToC is found.
    pub fallback_mode: FallbackMode,

    /// Prepended to every section slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_prefix: Option<String>,

    /// Send located ToC lines through the LLM repair pass.
    pub repair_toc: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            use_toc: true,
            max_depth: 3,
            toc_page_scan_budget: 16,
            fallback_mode: FallbackMode::Page,
            slug_prefix: None,
            repair_toc: false,
        }
    }
}

impl OutlineConfig {
    /// Page scan budget with the zero default resolved.
    pub fn effective_scan_budget(&self) -> usize {
        if self.toc_page_scan_budget == 0 {
            8
        } else {
            self.toc_page_scan_budget
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// LLM settings
    pub llm: LlmConfig,
    /// Outline settings
    pub outline: OutlineConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileSection>,
    outline: Option<OutlineFileSection>,
}

#[derive(Debug, Deserialize)]
struct LlmFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct OutlineFileSection {
    use_toc: Option<bool>,
    max_depth: Option<usize>,
    toc_page_scan_budget: Option<usize>,
    fallback_mode: Option<FallbackMode>,
    slug_prefix: Option<String>,
    repair_toc: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LLM_*, OUTLINE_*)
    /// 2. Config file (~/.config/doc-outline/config.yaml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(api_base) = env::var("LLM_API_BASE") {
            self.llm.api_base = api_base;
        }

        if let Ok(api_key) = env::var("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }

        if let Ok(model) = env::var("LLM_MODEL") {
            self.llm.model = model;
        }

        if let Ok(max_tokens) = env::var("LLM_MAX_TOKENS") {
            if let Ok(tokens) = max_tokens.parse() {
                self.llm.max_tokens = tokens;
            }
        }

        if let Ok(temperature) = env::var("LLM_TEMPERATURE") {
            if let Ok(temp) = temperature.parse() {
                self.llm.temperature = temp;
            }
        }

        if let Ok(timeout) = env::var("LLM_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.llm.timeout_secs = secs;
            }
        }

        if let Ok(depth) = env::var("OUTLINE_MAX_DEPTH") {
            if let Ok(depth) = depth.parse() {
                self.outline.max_depth = depth;
            }
        }

        if let Ok(pages) = env::var("OUTLINE_TOC_PAGES") {
            if let Ok(pages) = pages.parse() {
                self.outline.toc_page_scan_budget = pages;
            }
        }

        if let Ok(mode) = env::var("OUTLINE_FALLBACK") {
            self.outline.fallback_mode = mode.parse()?;
        }

        if let Ok(prefix) = env::var("OUTLINE_SLUG_PREFIX") {
            self.outline.slug_prefix = Some(prefix).filter(|p| !p.is_empty());
        }

        if let Ok(repair) = env::var("OUTLINE_REPAIR_TOC") {
            self.outline.repair_toc = matches!(repair.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(())
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OutlineError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML config document over the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file_config: ConfigFile = serde_yaml::from_str(content)
            .map_err(|e| OutlineError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(llm) = file_config.llm {
            if let Some(api_base) = llm.api_base {
                config.llm.api_base = api_base;
            }
            if let Some(api_key) = llm.api_key {
                config.llm.api_key = api_key;
            }
            if let Some(model) = llm.model {
                config.llm.model = model;
            }
            if let Some(max_tokens) = llm.max_tokens {
                config.llm.max_tokens = max_tokens;
            }
            if let Some(temperature) = llm.temperature {
                config.llm.temperature = temperature;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                config.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(outline) = file_config.outline {
            if let Some(use_toc) = outline.use_toc {
                config.outline.use_toc = use_toc;
            }
            if let Some(max_depth) = outline.max_depth {
                config.outline.max_depth = max_depth;
            }
            if let Some(budget) = outline.toc_page_scan_budget {
                config.outline.toc_page_scan_budget = budget;
            }
            if let Some(mode) = outline.fallback_mode {
                config.outline.fallback_mode = mode;
            }
            if outline.slug_prefix.is_some() {
                config.outline.slug_prefix = outline.slug_prefix;
            }
            if let Some(repair) = outline.repair_toc {
                config.outline.repair_toc = repair;
            }
        }

        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "doc-outline")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    ///
    /// LLM settings are only checked when the repair pass is enabled.
    pub fn validate(&self) -> Result<()> {
        if self.outline.repair_toc {
            self.validate_llm()?;
        }
        Ok(())
    }

    /// Validate the LLM connection settings.
    pub fn validate_llm(&self) -> Result<()> {
        if self.llm.api_base.is_empty() {
            return Err(OutlineError::Config(
                "LLM API base URL is required. Set LLM_API_BASE environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(OutlineError::Config(
                "LLM API key is required. Set LLM_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(OutlineError::Config(
                "LLM timeout must be at least one second. Set LLM_TIMEOUT_SECS or add to config file."
                    .to_string(),
            ));
        }

        if self.llm.model.is_empty() {
            return Err(OutlineError::Config(
                "LLM model is required. Set LLM_MODEL environment variable or add to config file."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Create a config from explicit values (useful for testing).
    pub fn with_llm(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm: LlmConfig {
                api_base: api_base.into(),
                api_key: api_key.into(),
                model: model.into(),
                ..Default::default()
            },
            outline: OutlineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.llm.api_base.is_empty());
        assert_eq!(config.llm.model, "claude-latest");
        assert_eq!(config.llm.timeout_secs, 120);
        assert!(config.outline.use_toc);
        assert_eq!(config.outline.max_depth, 3);
        assert_eq!(config.outline.toc_page_scan_budget, 16);
        assert_eq!(config.outline.fallback_mode, FallbackMode::Page);
        assert!(config.outline.slug_prefix.is_none());
        assert!(!config.outline.repair_toc);
    }

    #[test]
    fn test_validate_without_repair_skips_llm() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_with_repair_requires_llm() {
        let mut config = Config::default();
        config.outline.repair_toc = true;
        assert!(config.validate().is_err());

        let mut config = Config::with_llm("https://api.example.com", "test-key", "gpt-4");
        config.outline.repair_toc = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_scan_budget_uses_default() {
        let outline = OutlineConfig {
            toc_page_scan_budget: 0,
            ..Default::default()
        };
        assert_eq!(outline.effective_scan_budget(), 8);
    }

    #[test]
    fn test_validate_accepts_zero_max_depth() {
        // 0 is the "use the default depth" setting, resolved by build_sections
        let mut config = Config::default();
        config.outline.max_depth = 0;
        assert!(config.validate().is_ok());

        let config = Config::from_yaml("outline:\n  max_depth: 0\n").unwrap();
        assert_eq!(config.outline.max_depth, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::with_llm("https://api.example.com", "test-key", "gpt-4");
        config.outline.repair_toc = true;
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
llm:
  model: gpt-4
  timeout_secs: 30
outline:
  max_depth: 2
  fallback_mode: heading
  slug_prefix: manual
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.outline.max_depth, 2);
        assert_eq!(config.outline.fallback_mode, FallbackMode::Heading);
        assert_eq!(config.outline.slug_prefix.as_deref(), Some("manual"));
        assert_eq!(config.outline.toc_page_scan_budget, 16);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_mode() {
        let yaml = "outline:\n  fallback_mode: chapter\n";
        assert!(Config::from_yaml(yaml).is_err());
    }
}
