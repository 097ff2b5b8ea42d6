use krit_core::entities::AuditDocument;
use krit_core::responses::{AuditEventResponse, ListResponse, SyncResponse};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::output::output;

/// Handle `krit schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.target {
        SchemaTarget::Audit => schema_for!(AuditDocument),
        SchemaTarget::Sync => schema_for!(SyncResponse),
        SchemaTarget::Event => schema_for!(AuditEventResponse),
        SchemaTarget::List => schema_for!(ListResponse),
    };
    output(&schema, flags.format)
}
