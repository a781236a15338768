use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use convo_llm::BackendConfig;
use convo_session::{OrchestratorConfig, ReplyFailurePolicy};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub fallback_title: String,
    pub attachment_title_prompt: String,
    /// Unset means wait for replies indefinitely
    pub reply_timeout_secs: Option<u64>,
    pub reply_failure: ReplyFailurePolicy,
    pub failure_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            fallback_title: defaults.fallback_title,
            attachment_title_prompt: defaults.attachment_title_prompt,
            reply_timeout_secs: defaults.reply_timeout.map(|t| t.as_secs()),
            reply_failure: defaults.reply_failure,
            failure_notice: defaults.failure_notice,
        }
    }
}

impl From<SessionConfig> for OrchestratorConfig {
    fn from(config: SessionConfig) -> Self {
        Self {
            fallback_title: config.fallback_title,
            attachment_title_prompt: config.attachment_title_prompt,
            reply_timeout: config.reply_timeout_secs.map(Duration::from_secs),
            reply_failure: config.reply_failure,
            failure_notice: config.failure_notice,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables: CONVO_<SECTION>__<KEY>
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("CONVO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        self.session.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [backend]
            base_url = "http://127.0.0.1:9000"
            timeout_secs = 10

            [session]
            fallback_title = "Untitled"
            attachment_title_prompt = "Attachment"
            reply_timeout_secs = 45
            reply_failure = "append_notice"
            failure_notice = "Try again"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.backend.timeout_secs, Some(10));
        assert_eq!(config.logging.format, "json");

        let orchestrator = config.orchestrator();
        assert_eq!(orchestrator.fallback_title, "Untitled");
        assert_eq!(orchestrator.reply_timeout, Some(Duration::from_secs(45)));
        assert_eq!(orchestrator.reply_failure, ReplyFailurePolicy::AppendNotice);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, convo_llm::DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.orchestrator(), OrchestratorConfig::default());
    }

    #[test]
    fn test_session_timeout_is_seconds_and_optional() {
        let config: Config = toml::from_str(
            r#"
            [session]
            reply_failure = "append_notice"
        "#,
        )
        .unwrap();
        let orchestrator = config.orchestrator();
        assert_eq!(orchestrator.reply_timeout, None);
        assert_eq!(orchestrator.reply_failure, ReplyFailurePolicy::AppendNotice);
        assert_eq!(orchestrator.fallback_title, "New chat");

        let config: Config = toml::from_str("[session]\nreply_timeout_secs = 90\n").unwrap();
        assert_eq!(config.orchestrator().reply_timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_shipped_default_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.session.reply_timeout_secs, Some(120));
        assert_eq!(config.session.reply_failure, ReplyFailurePolicy::LogOnly);
    }
}
