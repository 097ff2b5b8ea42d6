use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Reconcile audit documents with the project's criteria document.
    Sync(SyncArgs),
    /// Append an audit event to one criterion.
    Event(EventArgs),
    /// Show one audit entry with its full event log.
    Show(ShowArgs),
    /// List the audit entries of one bidder.
    List(ListArgs),
    /// List the bidders of a project.
    Bidders(BiddersArgs),
    /// Print the JSON schema of a persisted or returned document.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SyncArgs {
    pub project: String,
    /// Only this bidder (default: all bidders)
    #[arg(long)]
    pub bidder: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EventArgs {
    /// kopiert, ki-pruefung, mensch-pruefung, freigabe, ablehnung, reset, entfernt
    pub kind: String,
    pub project: String,
    pub bidder: String,
    pub criterion: String,
    #[arg(long)]
    pub actor: Option<String>,
    /// Event payload, JSON or plain text
    #[arg(long)]
    pub result: Option<String>,
    /// New assessment, JSON or plain text
    #[arg(long)]
    pub assessment: Option<String>,
    /// Append even if the last event is equivalent
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    pub project: String,
    pub bidder: String,
    pub criterion: String,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    pub project: String,
    pub bidder: String,
}

#[derive(Clone, Debug, Args)]
pub struct BiddersArgs {
    pub project: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    Audit,
    Sync,
    Event,
    List,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value = "audit")]
    pub target: SchemaTarget,
}
