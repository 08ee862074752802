use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::protocol::CLASSIFY_PATH;
use thiserror::Error;
use url::Url;

pub const SETTINGS_FILE: &str = "classifier.toml";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

const ENV_SERVER_URL: &str = "CLASSIFIER_SERVER_URL";
const ENV_REQUEST_TIMEOUT_SECS: &str = "CLASSIFIER_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl { url: String, source: url::ParseError },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("invalid request timeout '{0}': expected whole seconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn classify_endpoint(&self) -> String {
        format!("{}{CLASSIFY_PATH}", self.server_url.trim().trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = Url::parse(self.server_url.trim()).map_err(|source| {
            SettingsError::InvalidServerUrl {
                url: self.server_url.clone(),
                source,
            }
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            _ => Err(SettingsError::UnsupportedScheme(self.server_url.clone())),
        }
    }
}

/// Defaults, then `classifier.toml` in the working directory, then environment.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(v) = file_cfg.server_url {
                settings.server_url = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = Some(v);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    if let Some(v) = env(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
        settings.server_url = v;
    }
    if let Some(v) = env(ENV_REQUEST_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
        let parsed = v
            .trim()
            .parse::<u64>()
            .map_err(|_| SettingsError::InvalidTimeout(v.clone()))?;
        settings.request_timeout_secs = Some(parsed);
    }

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        env::temp_dir().join(format!("classifier_settings_{tag}_{suffix}.toml"))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings_from(&temp_path("missing"), no_env).expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.classify_endpoint(),
            "http://127.0.0.1:5000/classify"
        );
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn environment_overrides_file() {
        let path = temp_path("layered");
        fs::write(
            &path,
            "server_url = \"http://file.example:9000\"\nrequest_timeout_secs = 30\n",
        )
        .expect("write settings");

        let vars = HashMap::from([(ENV_SERVER_URL, "https://env.example/api/")]);
        let settings =
            load_settings_from(&path, |name| vars.get(name).map(|v| v.to_string())).expect("load");

        assert_eq!(settings.server_url, "https://env.example/api/");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            settings.classify_endpoint(),
            "https://env.example/api/classify"
        );

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn rejects_non_http_server_url() {
        let vars = HashMap::from([(ENV_SERVER_URL, "ftp://example.com")]);
        let err = load_settings_from(&temp_path("scheme"), |name| {
            vars.get(name).map(|v| v.to_string())
        })
        .expect_err("ftp rejected");
        assert!(matches!(err, SettingsError::UnsupportedScheme(_)));
    }

    #[test]
    fn rejects_garbage_timeout() {
        let vars = HashMap::from([(ENV_REQUEST_TIMEOUT_SECS, "soon")]);
        let err = load_settings_from(&temp_path("timeout"), |name| {
            vars.get(name).map(|v| v.to_string())
        })
        .expect_err("timeout rejected");
        assert!(matches!(err, SettingsError::InvalidTimeout(_)));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let settings = Settings {
            request_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), None);
    }
}
