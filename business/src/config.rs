use serde::Deserialize;
use tracing::{debug, warn};

/// Environment variable that overrides the compiled-in base URL.
pub const BASE_URL_ENV: &str = "NEWSLETTER_ADMIN_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin of the newsletter web service, without a trailing slash.
    ///
    /// Empty means "same origin": endpoint paths are used as-is, which is what
    /// the browser build wants.
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    #[serde(default)]
    newsletter_admin_base_url: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
        }
    }

    /// Defaults plus whatever the process environment overrides.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`BusinessConfig::from_env`] over an explicit variable set.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();

        let overrides: EnvOverrides = match serde_env::from_iter(pairs) {
            Ok(overrides) => overrides,
            Err(err) => {
                warn!("Ignoring unreadable environment overrides: {err}");
                EnvOverrides::default()
            }
        };

        match overrides.newsletter_admin_base_url {
            Some(url) if !url.trim().is_empty() => {
                debug!("Using {BASE_URL_ENV}={url}");
                Self::new(url)
            }
            _ => Self::default(),
        }
    }

    /// Resolve an endpoint path (`/admin/subscribers`) or absolute URL against the base.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_owned();
        }

        let path = endpoint.trim_start_matches('/');
        if self.base_url.is_empty() {
            format!("/{path}")
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else if cfg!(feature = "env_local") {
                "http://127.0.0.1:5000".to_owned()
            } else if cfg!(feature = "env_staging") {
                "https://staging.medtech-newsletter.de".to_owned()
            } else {
                "https://medtech-newsletter.de".to_owned()
            },
        }
    }
}
