use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://kurdish-dictionary2.onrender.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the entry store, without the `/words/` suffix
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl StoreConfig {
    /// Override with whichever variables are set
    pub fn apply_env(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(api_url) = var("FERHENG_API_URL") {
            self.api_url = api_url;
        }
        if let Some(timeout_seconds) = var("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.timeout_seconds = timeout_seconds;
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
