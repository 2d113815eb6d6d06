use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct ReportBuilderConfig {
    pub url: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    // Connection timeout in seconds for reaching the report builder.
    // If not set, uses reqwest's default behavior (no specific connect timeout).
    pub connect_timeout_secs: Option<u64>,
    // Maximum number of concurrent requests to the report builder across all handlers.
    // If not set, a sensible default will be used in `AppState`.
    pub max_outbound_concurrency: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub listen: Option<String>,
    // Identifier reported by the ping endpoint. Defaults to `backend`.
    pub service_name: Option<String>,
    // Locale used when the caller's Accept-Language matches no catalog. Defaults to `en`.
    pub default_locale: Option<String>,
    pub report_builder: ReportBuilderConfig,
    // Message catalogs keyed by locale, then by message key.
    // Entries here are layered over the built-in catalog.
    #[serde(default)]
    pub messages: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let cfg_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&cfg_str)?)
    }
}
