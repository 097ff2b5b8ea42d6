use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `krit show`.
pub fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .service
        .show(&args.project, &args.bidder, &args.criterion)?;

    match flags.format {
        OutputFormat::Table => output(&response.entry.events, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}
