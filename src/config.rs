use crate::error::AppError;

/// Environment variable holding the external API base URL.
pub const BASE_URL_VAR: &str = "BLOG_ADMIN_API_BASE_URL";

/// Connection settings for the external blog API.
///
/// Built once at startup and handed to the HTTP client and the components.
/// A missing or malformed base URL is not rejected here: requests built from
/// it simply fail and surface through the pages' normal error paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// The API base URL (e.g., `https://api.example.com`).
    pub base_url: String,
}

impl ApiConfig {
    /// Build with an explicit base URL (useful for testing / DI).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from the process environment.
    ///
    /// Reads `BLOG_ADMIN_API_BASE_URL`; falls back to an empty base URL.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_VAR) {
            Ok(base_url) => Self::new(base_url),
            Err(_) => {
                tracing::warn!("{BASE_URL_VAR} not set; API requests will fail");
                Self::default()
            }
        }
    }

    /// Read the base URL baked in when the browser bundle was compiled.
    pub fn from_build_env() -> Self {
        match option_env!("BLOG_ADMIN_API_BASE_URL") {
            Some(base_url) => Self::new(base_url),
            None => {
                tracing::warn!("{BASE_URL_VAR} was not set at build time; API requests will fail");
                Self::default()
            }
        }
    }

    /// Join an API path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Resolve a stored image reference to a loadable URL.
    ///
    /// Absolute URLs pass through. Relative paths are appended to the base
    /// URL, adding a `/` only when the path does not start with one.
    pub fn asset_url(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        if url::Url::parse(path).is_ok() {
            return Some(path.to_string());
        }
        let separator = if path.starts_with('/') { "" } else { "/" };
        Some(format!("{}{}{}", self.base_url, separator, path))
    }

    /// Fail early when the base URL cannot be parsed.
    pub fn validate(&self) -> Result<(), AppError> {
        url::Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|e| AppError::Config(format!("Invalid API base URL '{}': {e}", self.base_url)))
    }
}
