//! Client profile configuration.
//!
//! # Responsibility
//! - Resolve the active profile from `~/.modal.toml` and `MODAL_*` variables.
//! - Carry the server-advertised message limit into the startup parity check.
//!
//! # Invariants
//! - Resolution order: defaults, config file profile, environment overrides.
//! - An absent or unreadable config file is skipped; a malformed one is an error.
//! - Exported C functions never read configuration.

use crate::limits::{verify_server_limit, LimitResult};
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "https://api.modal.com:443";
const CONFIG_FILE_NAME: &str = ".modal.toml";

/// Result alias for profile loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file was read but is not valid TOML for a profile table.
    Parse(String),
    /// Requested profile is not declared in the config file.
    ProfileNotFound(String),
    /// `MODAL_MAX_MESSAGE_SIZE` is not a non-negative integer.
    InvalidMessageSize(String),
    /// Token id or secret missing after all sources are applied.
    MissingCredentials,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse config file: {err}"),
            Self::ProfileNotFound(name) => {
                write!(f, "profile {name:?} not found in config file")
            }
            Self::InvalidMessageSize(raw) => {
                write!(f, "MODAL_MAX_MESSAGE_SIZE must be an integer, got `{raw}`")
            }
            Self::MissingCredentials => write!(
                f,
                "missing auth, please set MODAL_TOKEN_ID / MODAL_TOKEN_SECRET or use ~/.modal.toml"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Active configuration profile. Only one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub server_url: String,
    pub token_id: String,
    pub token_secret: String,
    pub environment: Option<String>,
    /// Message limit the API server is configured with, when known.
    pub server_max_message_size: Option<usize>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token_id: String::new(),
            token_secret: String::new(),
            environment: None,
            server_max_message_size: None,
        }
    }
}

/// Profile entry as written in the config file; every field is optional.
#[derive(Debug, Deserialize)]
struct ConfigFileProfile {
    server_url: Option<String>,
    token_id: Option<String>,
    token_secret: Option<String>,
    environment: Option<String>,
    max_message_size: Option<usize>,
    #[serde(default)]
    active: bool,
}

impl ConfigFileProfile {
    fn apply_to(&self, profile: &mut Profile) {
        if let Some(server_url) = &self.server_url {
            profile.server_url = server_url.clone();
        }
        if let Some(token_id) = &self.token_id {
            profile.token_id = token_id.clone();
        }
        if let Some(token_secret) = &self.token_secret {
            profile.token_secret = token_secret.clone();
        }
        if let Some(environment) = &self.environment {
            profile.environment = Some(environment.clone());
        }
        if let Some(limit) = self.max_message_size {
            profile.server_max_message_size = Some(limit);
        }
    }
}

impl Profile {
    /// Loads the profile from `~/.modal.toml` and the process environment.
    ///
    /// `profile_name` takes precedence over `MODAL_PROFILE`.
    ///
    /// # Errors
    /// - Returns `ConfigError::Parse` when the config file is malformed.
    /// - Returns `ConfigError::ProfileNotFound` for an unknown named profile.
    /// - Returns `ConfigError::MissingCredentials` without a token id/secret.
    pub fn from_env(profile_name: Option<&str>) -> ConfigResult<Self> {
        let contents = default_config_path().and_then(|path| read_config_file(&path));
        Self::resolve(contents.as_deref(), profile_name, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolves a profile from config file contents and an environment lookup.
    pub fn resolve(
        config_contents: Option<&str>,
        profile_name: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut profile = Profile::default();

        let profiles: BTreeMap<String, ConfigFileProfile> = match config_contents {
            Some(contents) => {
                toml::from_str(contents).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
            None => BTreeMap::new(),
        };

        let selected = profile_name
            .map(str::to_string)
            .or_else(|| env("MODAL_PROFILE").filter(|name| !name.is_empty()));
        let source = match selected {
            Some(name) => match profiles.get(&name) {
                Some(entry) => {
                    entry.apply_to(&mut profile);
                    Some(name)
                }
                None => return Err(ConfigError::ProfileNotFound(name)),
            },
            None => profiles
                .iter()
                .find(|(_, entry)| entry.active)
                .map(|(name, entry)| {
                    entry.apply_to(&mut profile);
                    name.clone()
                }),
        };

        if let Some(server_url) = env("MODAL_SERVER_URL") {
            profile.server_url = server_url;
        }
        if let Some(token_id) = env("MODAL_TOKEN_ID") {
            profile.token_id = token_id;
        }
        if let Some(token_secret) = env("MODAL_TOKEN_SECRET") {
            profile.token_secret = token_secret;
        }
        if let Some(environment) = env("MODAL_ENVIRONMENT") {
            profile.environment = Some(environment);
        }
        if let Some(raw) = env("MODAL_MAX_MESSAGE_SIZE") {
            let limit = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMessageSize(raw.clone()))?;
            profile.server_max_message_size = Some(limit);
        }

        if profile.token_id.is_empty() || profile.token_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        info!(
            "event=profile_load module=config status=ok profile={} server_url={}",
            source.as_deref().unwrap_or("<none>"),
            profile.server_url
        );
        Ok(profile)
    }

    /// Runs the size-limit parity check when the server limit is known.
    ///
    /// Returns `Ok(false)` when the profile declares no server limit.
    pub fn check_limit_parity(&self) -> LimitResult<bool> {
        match self.server_max_message_size {
            Some(server_limit) => verify_server_limit(server_limit).map(|()| true),
            None => Ok(false),
        }
    }
}

/// Path of the per-user config file, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Reads a config file, treating any file that cannot be read as absent.
///
/// Only the contents can make profile loading fail; a missing file, a
/// directory or a permission error falls back to env-only resolution.
pub fn read_config_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(
                "event=config_read module=config status=skipped path={} error={err}",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Profile, DEFAULT_SERVER_URL};
    use std::collections::HashMap;

    const CONFIG: &str = r#"
[default]
token_id = "ak-default"
token_secret = "as-default"
active = true

[staging]
server_url = "https://staging.example:443"
token_id = "ak-staging"
token_secret = "as-staging"
environment = "dev"
max_message_size = 104857600
"#;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn picks_first_active_profile_by_default() {
        let profile = Profile::resolve(Some(CONFIG), None, env_of(&[])).expect("resolve");
        assert_eq!(profile.token_id, "ak-default");
        assert_eq!(profile.server_url, DEFAULT_SERVER_URL);
        assert_eq!(profile.server_max_message_size, None);
    }

    #[test]
    fn named_profile_wins_over_modal_profile_env() {
        let profile = Profile::resolve(
            Some(CONFIG),
            Some("staging"),
            env_of(&[("MODAL_PROFILE", "default")]),
        )
        .expect("resolve");
        assert_eq!(profile.token_id, "ak-staging");
        assert_eq!(profile.environment.as_deref(), Some("dev"));
        assert_eq!(profile.server_max_message_size, Some(104_857_600));
    }

    #[test]
    fn modal_profile_env_selects_profile() {
        let profile =
            Profile::resolve(Some(CONFIG), None, env_of(&[("MODAL_PROFILE", "staging")]))
                .expect("resolve");
        assert_eq!(profile.server_url, "https://staging.example:443");
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let err = Profile::resolve(Some(CONFIG), Some("prod"), env_of(&[]))
            .expect_err("unknown profile must fail");
        assert_eq!(err, ConfigError::ProfileNotFound("prod".to_string()));
    }

    #[test]
    fn environment_overrides_file_values() {
        let profile = Profile::resolve(
            Some(CONFIG),
            None,
            env_of(&[
                ("MODAL_TOKEN_ID", "ak-env"),
                ("MODAL_SERVER_URL", "http://localhost:8889"),
                ("MODAL_MAX_MESSAGE_SIZE", "4194304"),
            ]),
        )
        .expect("resolve");
        assert_eq!(profile.token_id, "ak-env");
        assert_eq!(profile.token_secret, "as-default");
        assert_eq!(profile.server_url, "http://localhost:8889");
        assert_eq!(profile.server_max_message_size, Some(4_194_304));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let err = Profile::resolve(None, None, env_of(&[("MODAL_TOKEN_ID", "ak")]))
            .expect_err("missing secret must fail");
        assert_eq!(err, ConfigError::MissingCredentials);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let err = Profile::resolve(Some("[default\ntoken_id ="), None, env_of(&[]))
            .expect_err("malformed toml must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_numeric_message_size_is_rejected() {
        let err = Profile::resolve(
            Some(CONFIG),
            None,
            env_of(&[("MODAL_MAX_MESSAGE_SIZE", "100MiB")]),
        )
        .expect_err("non-numeric size must fail");
        assert_eq!(err, ConfigError::InvalidMessageSize("100MiB".to_string()));
    }

    #[test]
    fn parity_check_runs_only_when_server_limit_is_known() {
        let unknown = Profile::resolve(Some(CONFIG), None, env_of(&[])).expect("resolve");
        assert_eq!(unknown.check_limit_parity(), Ok(false));

        let matching =
            Profile::resolve(Some(CONFIG), Some("staging"), env_of(&[])).expect("resolve");
        assert_eq!(matching.check_limit_parity(), Ok(true));

        let drifted = Profile {
            server_max_message_size: Some(64 * 1024 * 1024),
            ..matching
        };
        assert!(drifted.check_limit_parity().is_err());
    }
}
