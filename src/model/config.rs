use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    /// Root of the REST API, without a trailing slash.
    pub base_url: String,

    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Durable client state. Only the session credential lives here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}
