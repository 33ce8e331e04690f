//! Configuration management for prompthub.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - A `.env` file in the current directory
//! - Environment variables
//! - Command-line flags
//! - Config files (.prompthub/config.yaml)
//!
//! The resulting `AppConfig` is passed explicitly into every command; nothing
//! below the binaries reads the process environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Environment variable holding the prompt hub credential.
pub const API_KEY_ENV: &str = "LANGSMITH_API_KEY";

/// Environment variable overriding the hub API endpoint.
pub const ENDPOINT_ENV: &str = "LANGSMITH_ENDPOINT";

/// Default hub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.smith.langchain.com";

/// Default hub web UI, used to build links to published prompts.
pub const DEFAULT_WEB_URL: &str = "https://smith.langchain.com";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Working root; relative document paths resolve against it
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Hub credential (from `LANGSMITH_API_KEY`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Hub API base URL
    pub api_url: String,

    /// Hub web UI base URL
    pub web_url: String,

    /// Whether newly created hub repositories are public
    pub public: bool,

    /// Directory holding prompt documents, relative to the workspace
    pub prompts_dir: PathBuf,

    /// Settings for `pull-prompts`
    pub pull: PullConfig,

    /// Settings for `push-prompts`
    pub push: PushConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Defaults applied by the Fetcher.
///
/// `description`, `version` and `tags` are written into every fetched
/// document instead of anything the hub returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullConfig {
    /// Qualified hub name to pull (`owner/repo`)
    pub source: String,

    /// Output document name (without `.yml`)
    pub file: String,

    pub description: String,

    pub version: String,

    pub tags: Vec<String>,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            source: "leonanluppi/bug_to_user_story_v1".to_string(),
            file: "bug_to_user_story_v1".to_string(),
            description: "Prompt para converter relatos de bugs em User Stories".to_string(),
            version: "v1".to_string(),
            tags: vec![
                "bug-analysis".to_string(),
                "user-story".to_string(),
                "product-management".to_string(),
            ],
        }
    }
}

/// Settings for the Publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Input document name (without `.yml`)
    pub file: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            file: "bug_to_user_story_v2".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    hub: Option<HubSection>,
    prompts: Option<PromptsSection>,
    pull: Option<PullSection>,
    push: Option<PushSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HubSection {
    #[serde(rename = "apiUrl")]
    api_url: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptsSection {
    dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PullSection {
    source: Option<String>,
    file: Option<String>,
    description: Option<String>,
    version: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PushSection {
    file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            public: false,
            prompts_dir: PathBuf::from("prompts"),
            pull: PullConfig::default(),
            push: PushConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, environment variables, the optional
    /// config file and defaults. Explicit workspace and config file paths
    /// take precedence over their environment variables.
    ///
    /// Environment variables:
    /// - `PROMPTHUB_WORKSPACE`: Override workspace path
    /// - `PROMPTHUB_CONFIG`: Path to config file
    /// - `LANGSMITH_API_KEY`: Hub credential
    /// - `LANGSMITH_ENDPOINT`: Hub API base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use prompthub_core::config::AppConfig;
    ///
    /// let config = AppConfig::load_with(None, None).expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        // A missing .env is fine; a broken one is not.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AppError::Config(format!("Failed to read .env file: {}", e)));
            }
        }

        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_var("PROMPTHUB_WORKSPACE").map(PathBuf::from)) {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| env_var("PROMPTHUB_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.workspace.join(".prompthub/config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        config.api_key = env_var(API_KEY_ENV);

        if let Some(endpoint) = env_var(ENDPOINT_ENV) {
            config.api_url = endpoint;
        }

        if let Some(level) = env_var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();

        if let Some(hub) = config_file.hub {
            if let Some(api_url) = hub.api_url {
                result.api_url = api_url;
            }
            if let Some(web_url) = hub.web_url {
                result.web_url = web_url;
            }
            if let Some(public) = hub.public {
                result.public = public;
            }
        }

        if let Some(dir) = config_file.prompts.and_then(|p| p.dir) {
            result.prompts_dir = PathBuf::from(dir);
        }

        if let Some(pull) = config_file.pull {
            if let Some(source) = pull.source {
                result.pull.source = source;
            }
            if let Some(file) = pull.file {
                result.pull.file = file;
            }
            if let Some(description) = pull.description {
                result.pull.description = description;
            }
            if let Some(version) = pull.version {
                result.pull.version = version;
            }
            if let Some(tags) = pull.tags {
                result.pull.tags = tags;
            }
        }

        if let Some(file) = config_file.push.and_then(|p| p.file) {
            result.push.file = file;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Flags take precedence over environment variables and the config file.
    pub fn with_overrides(mut self, log_level: Option<String>, verbose: bool, no_color: bool) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Directory holding prompt documents.
    pub fn prompts_path(&self) -> PathBuf {
        self.workspace.join(&self.prompts_dir)
    }

    /// Path of the named document, `<prompts_dir>/<name>.yml`.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.prompts_path().join(format!("{}.yml", name))
    }

    /// Names of required environment variables that are not set.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(API_KEY_ENV.to_string());
        }
        missing
    }

    /// Return the hub credential, or every missing required variable.
    pub fn require_credentials(&self) -> AppResult<&str> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(AppError::MissingConfiguration(missing));
        }
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::MissingConfiguration(vec![API_KEY_ENV.to_string()]))
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
