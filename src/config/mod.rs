use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Observed local development address of the prediction service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "CALBURN_URL";

const CONFIG_FILE_NAME: &str = "calburn.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the prediction service. `None` falls through to the
    /// environment variable and then the built-in default.
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Load configuration from an explicit `--config` path, or from the
    /// per-user config directory when the file exists there. Returns the
    /// path the config was read from, if any.
    pub fn load(path_override: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match path_override {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };

        match path {
            Some(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// `calburn.toml` inside the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "calburn")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Where the effective base URL came from, for `calburn config` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    Flag,
    Environment,
    File,
    Default,
}

impl fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointSource::Flag => write!(f, "--url flag"),
            EndpointSource::Environment => write!(f, "{BASE_URL_ENV} environment variable"),
            EndpointSource::File => write!(f, "config file"),
            EndpointSource::Default => write!(f, "built-in default"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    pub base_url: String,
    pub source: EndpointSource,
}

/// Resolve the effective base URL. Precedence: `--url` flag, then the
/// `CALBURN_URL` environment variable, then the config file, then the
/// built-in default. The winning value is validated here, so a bogus URL
/// is rejected before any command runs.
pub fn resolve_endpoint(flag: Option<String>, config: &ClientConfig) -> Result<ResolvedEndpoint> {
    let env = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty());
    resolve_endpoint_from(flag, env, config)
}

fn resolve_endpoint_from(
    flag: Option<String>,
    env: Option<String>,
    config: &ClientConfig,
) -> Result<ResolvedEndpoint> {
    let resolved = if let Some(base_url) = flag {
        ResolvedEndpoint {
            base_url,
            source: EndpointSource::Flag,
        }
    } else if let Some(base_url) = env {
        ResolvedEndpoint {
            base_url,
            source: EndpointSource::Environment,
        }
    } else if let Some(base_url) = config.endpoint.base_url.clone() {
        ResolvedEndpoint {
            base_url,
            source: EndpointSource::File,
        }
    } else {
        ResolvedEndpoint {
            base_url: DEFAULT_BASE_URL.to_string(),
            source: EndpointSource::Default,
        }
    };

    validate_base_url(&resolved.base_url, resolved.source)?;
    Ok(resolved)
}

fn validate_base_url(base_url: &str, source: EndpointSource) -> Result<()> {
    let parsed = Url::parse(base_url)
        .with_context(|| format!("invalid base URL '{base_url}' from {source}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported URL scheme '{}' in base URL from {source}",
            parsed.scheme()
        );
    }
    Ok(())
}
