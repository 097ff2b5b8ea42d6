use crate::cli::GlobalFlags;
use crate::cli::root_commands::BiddersArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `krit bidders`.
pub fn handle(args: &BiddersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx.service.bidders(&args.project)?;
    output(&response, flags.format)
}
