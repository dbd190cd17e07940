//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! local setups can keep the Slack credentials out of the shell profile.

use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5005;
const DEFAULT_DB: &str = "callscript.sqlite";
const DEFAULT_SLACK_API: &str = "https://slack.com/api";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB
const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Credentials for pushing contacts into a Slack direct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackConfig {
    pub bot_token: String,
    pub user_id: String,
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub json_limit: usize,
    /// Largest accepted multipart part, in bytes.
    pub upload_limit: usize,
    /// `None` unless both the bot token and the target user are set.
    pub slack: Option<SlackConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let json_limit = match var("CALLSCRIPT_JSON_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: "CALLSCRIPT_JSON_LIMIT",
                expected: "a size in bytes",
                value: raw,
            })?,
            None => DEFAULT_JSON_LIMIT,
        };

        let upload_limit = match var("CALLSCRIPT_UPLOAD_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: "CALLSCRIPT_UPLOAD_LIMIT",
                expected: "a size in bytes",
                value: raw,
            })?,
            None => DEFAULT_UPLOAD_LIMIT,
        };

        let slack = match (var("SLACK_BOT_TOKEN"), var("SLACK_USER_ID")) {
            (Some(bot_token), Some(user_id)) => Some(SlackConfig {
                bot_token,
                user_id,
                api_url: var("SLACK_API_URL")
                    .unwrap_or_else(|| DEFAULT_SLACK_API.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            }),
            _ => None,
        };

        Ok(Config {
            host: var("CALLSCRIPT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_path: PathBuf::from(var("CALLSCRIPT_DB").unwrap_or_else(|| DEFAULT_DB.to_string())),
            json_limit,
            upload_limit,
            slack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5005);
        assert_eq!(config.database_path, PathBuf::from("callscript.sqlite"));
        assert_eq!(config.json_limit, 10 * 1024 * 1024);
        assert_eq!(config.upload_limit, 10 * 1024 * 1024);
        assert!(config.slack.is_none());
    }

    #[test]
    fn slack_needs_token_and_user() {
        let only_token = Config::from_lookup(lookup(&[("SLACK_BOT_TOKEN", "xoxb")])).unwrap();
        assert!(only_token.slack.is_none());

        let both = Config::from_lookup(lookup(&[
            ("SLACK_BOT_TOKEN", "xoxb"),
            ("SLACK_USER_ID", "U123"),
            ("SLACK_API_URL", "http://localhost:9999/api/"),
        ]))
        .unwrap();
        assert_eq!(
            both.slack,
            Some(SlackConfig {
                bot_token: "xoxb".into(),
                user_id: "U123".into(),
                api_url: "http://localhost:9999/api".into(),
            })
        );
    }

    #[test]
    fn bad_port_is_reported() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PORT must be a port number, got \"eighty\""
        );
    }

    #[test]
    fn upload_limit_is_configurable() {
        let config = Config::from_lookup(lookup(&[("CALLSCRIPT_UPLOAD_LIMIT", "2048")])).unwrap();
        assert_eq!(config.upload_limit, 2048);
        assert!(Config::from_lookup(lookup(&[("CALLSCRIPT_UPLOAD_LIMIT", "-1")])).is_err());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("PORT", "  "), ("CALLSCRIPT_DB", "")])).unwrap();
        assert_eq!(config.port, 5005);
        assert_eq!(config.database_path, PathBuf::from("callscript.sqlite"));
    }
}
