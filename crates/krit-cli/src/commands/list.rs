use crate::cli::root_commands::ListArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `krit list`.
pub fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.service.list(&args.project, &args.bidder)?;
    match flags.format {
        OutputFormat::Table => output(&response.entries, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}
