use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://3dhkilcepgv6.manus.space/api";
pub const BASE_URL_ENV: &str = "IOSOAI_API_BASE_URL";

/// Where the remote API lives. Fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `.env` if present, then `IOSOAI_API_BASE_URL`, else the production address.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        match dotenvy::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!(base_url = %url, "using API base url from {BASE_URL_ENV}");
                Self::new(url.trim())
            }
            _ => {
                info!("{BASE_URL_ENV} not set, using default: {DEFAULT_BASE_URL}");
                Self::default()
            }
        }
    }
}
