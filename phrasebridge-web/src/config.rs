//! Server configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_ALIASES_PATH: &str = "language_aliases.json";

/// Settings read once at startup
#[derive(Clone)]
pub struct Config {
    /// Google API key; `None` leaves the endpoint unconfigured
    pub api_key: Option<String>,
    /// Site-wide default target as a language name or code
    pub site_main_target: Option<String>,
    pub aliases_path: PathBuf,
    /// Override for the Google endpoint (proxies, local fakes)
    pub google_base_url: Option<String>,
    pub bind_addr: String,
}

impl Config {
    /// Load from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_key: get("GOOGLE_API_KEY").or_else(|| get("GOOGLE_TRANSLATE_API_KEY")),
            site_main_target: get("SITE_MAIN_TARGET"),
            aliases_path: get("LANGUAGE_ALIASES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ALIASES_PATH)),
            google_base_url: get("GOOGLE_TRANSLATE_BASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// API key safe for logs, if one is set
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_api_key())
            .field("site_main_target", &self.site_main_target)
            .field("aliases_path", &self.aliases_path)
            .field("google_base_url", &self.google_base_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

/// First 6 and last 4 characters; short secrets are hidden entirely
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 10 {
        return "***".to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
