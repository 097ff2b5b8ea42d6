use krit_core::enums::EventKind;
use krit_store::AuditEventRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EventArgs;
use crate::commands::shared::parse::{parse_enum, parse_json_or_text};
use crate::context::AppContext;
use crate::output::output;

/// Handle `krit event`.
pub fn handle(args: &EventArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind: EventKind = parse_enum(&args.kind, "event kind")?;

    let mut request = AuditEventRequest::new(kind, &args.project, &args.bidder, &args.criterion);
    request.actor.clone_from(&args.actor);
    request.result = args.result.as_deref().map(parse_json_or_text);
    request.assessment = args.assessment.as_deref().map(parse_json_or_text);
    request.force_duplicate = args.force;

    let response = ctx.service.audit_event(request)?;
    output(&response, flags.format)
}
