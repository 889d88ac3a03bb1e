//! Server settings, read from the client's `initializationOptions`.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// How long the "Copied!" acknowledgment stays active by default.
pub const DEFAULT_COPY_ACK_MILLIS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Lifetime of the copy acknowledgment in milliseconds
    pub copy_ack_millis: u64,
    /// Report request-body fields the method's editing policy hides
    pub policy_diagnostics: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            copy_ack_millis: DEFAULT_COPY_ACK_MILLIS,
            policy_diagnostics: true,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from initialization options, using defaults for
    /// anything missing or malformed.
    pub fn from_init_options(options: Option<&Value>) -> Self {
        let Some(options) = options.filter(|value| !value.is_null()) else {
            info!("no initialization options; using defaults");
            return Self::default();
        };

        match Self::deserialize(options) {
            Ok(config) => {
                info!(
                    copy_ack_millis = config.copy_ack_millis,
                    policy_diagnostics = config.policy_diagnostics,
                    "loaded server configuration"
                );
                config
            }
            Err(err) => {
                warn!(error = %err, "invalid initialization options; falling back to defaults");
                Self::default()
            }
        }
    }

    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_millis)
    }
}
