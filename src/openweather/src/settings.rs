use std::fmt;

use serde::Deserialize;

pub static DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0";
pub static DEFAULT_DATA_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_data_url")]
    pub data_url: String,
    /// No timeout is applied when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocoding_url: default_geocoding_url(),
            data_url: default_data_url(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"***")
            .field("geocoding_url", &self.geocoding_url)
            .field("data_url", &self.data_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}
