//! Client configuration: API base URL and the read-only capability.

use anyhow::Context;
use dealership_core::CarId;
use reqwest::Url;

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5198";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_VAR: &str = "DEALERSHIP_API_BASE_URL";

/// Environment variable enabling the read-only variant.
pub const READ_ONLY_VAR: &str = "DEALERSHIP_READ_ONLY";

const COLLECTION_PATH: &str = "api/cars";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    read_only: bool,
}

impl ClientConfig {
    /// Parse a base URL; a trailing slash is optional.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        // Join semantics need a trailing slash to keep any path prefix.
        let base_url = Url::parse(&format!("{trimmed}/"))
            .with_context(|| format!("invalid API base URL {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL {base_url} cannot carry paths");
        }

        Ok(Self {
            base_url,
            read_only: false,
        })
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Load configuration from the environment.
    ///
    /// Native builds read the variables at runtime; WASM builds have no process
    /// environment, so the values are baked in at compile time instead.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env_value(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let read_only = env_value(READ_ONLY_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let config = Self::new(&base_url)?.read_only(read_only);
        tracing::debug!(base_url = %config.base_url, read_only, "loaded client config");
        Ok(config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// `{base}/api/cars`
    pub fn collection_url(&self) -> Url {
        self.join(COLLECTION_PATH)
    }

    /// `{base}/api/cars/{id}`
    pub fn item_url(&self, id: CarId) -> Url {
        self.join(&format!("{COLLECTION_PATH}/{id}"))
    }

    fn join(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // `path` is made of fixed segments and an integer id; pushing segments
        // cannot fail on a URL that passed the cannot-be-a-base check in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/'));
        }
        url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(&format!("{DEFAULT_API_BASE_URL}/"))
                .expect("default API base URL is valid"),
            read_only: false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn env_value(name: &str) -> Option<String> {
    let value = match name {
        API_BASE_URL_VAR => option_env!("DEALERSHIP_API_BASE_URL"),
        READ_ONLY_VAR => option_env!("DEALERSHIP_READ_ONLY"),
        _ => None,
    };
    value.map(str::to_string).filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
