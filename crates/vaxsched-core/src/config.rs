use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "> ";

/// Top-level config (vaxsched.toml + VAXSCHED_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Interactive shell appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Printed before every read from stdin.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Print the welcome text and command list on startup.
    /// Override with env var: VAXSCHED_SHELL_BANNER=false
    #[serde(default = "bool_true")]
    pub banner: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: true,
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
fn default_db_path() -> String {
    format!("{}/.vaxsched/vaxsched.db", home_dir())
}
fn default_config_path() -> String {
    format!("{}/.vaxsched/vaxsched.toml", home_dir())
}
fn home_dir() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
}

impl SchedulerConfig {
    /// Load config from a TOML file with VAXSCHED_* env var overrides.
    ///
    /// Uses the explicit path when given, otherwise ~/.vaxsched/vaxsched.toml.
    /// A missing file is not an error: every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: SchedulerConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("VAXSCHED_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        tracing::debug!(path = %path, db = %config.database.path, "config loaded");
        Ok(config)
    }
}
