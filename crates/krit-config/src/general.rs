//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_sync_actor() -> String {
    "system".to_string()
}

fn default_actor() -> String {
    "api".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Actor recorded on events appended by reconciliation.
    #[serde(default = "default_sync_actor")]
    pub sync_actor: String,

    /// Actor recorded on reviewer events when the caller names none.
    #[serde(default = "default_actor")]
    pub default_actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            sync_actor: default_sync_actor(),
            default_actor: default_actor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.sync_actor, "system");
        assert_eq!(config.default_actor, "api");
    }
}
