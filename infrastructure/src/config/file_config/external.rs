//! External service configuration from TOML (`[external_service]` section)

use serde::{Deserialize, Serialize};

/// URL probed by `check_external_service`
pub const DEFAULT_STATUS_URL: &str = "https://httpbin.org/get";

/// Raw external service configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExternalServiceConfig {
    /// Status endpoint; any HTTP answer means online
    pub url: String,
}

impl Default for FileExternalServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STATUS_URL.to_string(),
        }
    }
}
