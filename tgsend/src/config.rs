//! Configuration for the `tgsend` binary.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `TGSEND_CONFIG`
//! environment variable. A missing file is not an error; every field can come from the environment.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `TGSEND_` override YAML values
//! 3. **TELEGRAM_BOT_TOKEN** - Special case: overrides `bot_token` if set
//!
//! ## Example
//!
//! ```yaml
//! bot_token: "123456:ABC-DEF"
//! api_url: https://api.telegram.org
//! timeout_secs: 60
//! ```

use std::fmt;
use std::time::Duration;

use clap::{Parser, Subcommand};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "TGSEND_CONFIG", default_value = "config.yaml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Upload an audio file as a protected (non-forwardable) message
    SendAudio {
        /// Destination chat ID
        #[arg(long, allow_negative_numbers = true)]
        chat_id: i64,

        /// Local audio file to upload
        path: std::path::PathBuf,
    },

    /// Validate configuration and exit
    Validate,
}

/// Client configuration.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bot token issued by the platform; interpolated into every request path
    pub bot_token: String,
    /// Base URL of the bot API
    pub api_url: Url,
    /// Whole-request timeout. Unset means requests may block indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout_secs: None,
        }
    }
}

// Keeps the token out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(figment::Error::from)?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            // TGSEND_CONFIG names the file itself, not a field
            .merge(Env::prefixed("TGSEND_").ignore(&["CONFIG"]).split("__"))
            .merge(
                Env::raw()
                    .only(&["TELEGRAM_BOT_TOKEN"])
                    .map(|_| "bot_token".into()),
            )
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.bot_token.trim().is_empty() {
            return Err(
                "bot_token is not configured. Set TELEGRAM_BOT_TOKEN or add bot_token to the config file."
                    .to_string(),
            );
        }

        if self.bot_token.contains(['/', '?', '#']) || self.bot_token.chars().any(char::is_whitespace) {
            return Err("bot_token contains characters that are not allowed in a URL path".to_string());
        }

        if !matches!(self.api_url.scheme(), "http" | "https") || self.api_url.cannot_be_a_base() {
            return Err(format!("api_url must be an http(s) base URL, got {}", self.api_url));
        }

        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than zero when set".to_string());
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(config: &str) -> Args {
        Args {
            config: config.to_string(),
            command: Command::Validate,
        }
    }

    #[test]
    fn test_load_from_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
bot_token: "123456:ABC-DEF"
api_url: http://localhost:8081
timeout_secs: 45
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.bot_token, "123456:ABC-DEF");
            assert_eq!(config.api_url.as_str(), "http://localhost:8081/");
            assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
            Ok(())
        });
    }

    #[test]
    fn test_defaults_with_token_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("TELEGRAM_BOT_TOKEN", "999:from-env");

            let config = Config::load(&args("missing.yaml"))?;

            assert_eq!(config.bot_token, "999:from-env");
            assert_eq!(config.api_url.as_str(), "https://api.telegram.org/");
            assert_eq!(config.timeout(), None);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "bot_token: from-yaml\ntimeout_secs: 10\n")?;
            jail.set_env("TGSEND_TIMEOUT_SECS", "20");
            jail.set_env("TGSEND_CONFIG", "test.yaml");

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.bot_token, "from-yaml");
            assert_eq!(config.timeout_secs, Some(20));

            jail.set_env("TELEGRAM_BOT_TOKEN", "from-env");
            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.bot_token, "from-env");
            Ok(())
        });
    }

    #[test]
    fn test_missing_token_fails_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "api_url: https://api.telegram.org\n")?;

            let err = Config::load(&args("test.yaml")).unwrap_err();
            assert!(err.to_string().contains("bot_token is not configured"));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "bot_token: abc\nprotect: false\n")?;

            assert!(Config::load(&args("test.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config {
            bot_token: "12:ab/cd".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.bot_token = "12:abcd".to_string();
        assert!(config.validate().is_ok());

        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.timeout_secs = None;
        config.api_url = Url::parse("ftp://example.com").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            bot_token: "secret-token".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_parse_send_audio_args() {
        let args = Args::try_parse_from([
            "tgsend",
            "-f",
            "bot.yaml",
            "send-audio",
            "--chat-id",
            "-100123",
            "song.mp3",
        ])
        .unwrap();

        assert_eq!(args.config, "bot.yaml");
        assert_eq!(
            args.command,
            Command::SendAudio {
                chat_id: -100123,
                path: "song.mp3".into(),
            }
        );
    }
}
