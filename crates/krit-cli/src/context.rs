use krit_config::KritConfig;
use krit_store::AuditService;

use crate::cli::GlobalFlags;

/// Everything a command handler needs.
pub struct AppContext {
    pub service: AuditService,
}

impl AppContext {
    /// Load layered config (with `.env`) and apply `--root`.
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config = KritConfig::load_with_dotenv()?;
        if let Some(root) = &flags.root {
            config.paths.projects_root.clone_from(root);
        }
        tracing::debug!(root = %config.paths.projects_root, "configuration loaded");

        Ok(Self {
            service: AuditService::from_config(&config),
        })
    }
}
