use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Fallback filter when `RUST_LOG` is unset
    pub filter: String,
}

impl LogConfig {
    /// `LOG_FORMAT=json` or `LOG_FORMAT=pretty`; other values are ignored
    pub fn apply_env(&mut self, var: &impl Fn(&str) -> Option<String>) {
        match var("LOG_FORMAT").as_deref() {
            Some("json") => self.format = LogFormat::Json,
            Some("pretty") => self.format = LogFormat::Pretty,
            _ => {}
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}
