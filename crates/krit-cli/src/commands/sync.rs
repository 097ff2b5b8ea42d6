use crate::cli::root_commands::SyncArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `krit sync`.
pub fn handle(args: &SyncArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.service.sync(&args.project, args.bidder.as_deref())?;
    if response.failed > 0 {
        tracing::warn!(failed = response.failed, "some bidders could not be synced");
    }

    match flags.format {
        OutputFormat::Table => output(&response.bidders, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}
