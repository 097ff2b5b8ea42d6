use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `krit` binary.
#[derive(Debug, Parser)]
#[command(name = "krit", version, about = "krit - bidder criteria audit trail")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Projects root directory (overrides `paths.projects_root`)
    #[arg(short, long, global = true)]
    pub root: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            root: self.root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::root_commands::SchemaTarget;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["krit", "--format", "table", "--verbose", "bidders", "P1"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Bidders(ref args) if args.project == "P1"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["krit", "sync", "P1", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Sync(ref args) if args.bidder.is_none()));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["krit", "--format", "xml", "bidders", "P1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn event_command_takes_positional_target() {
        let cli = Cli::try_parse_from([
            "krit",
            "event",
            "mensch-pruefung",
            "P1",
            "B1",
            "K1",
            "--actor",
            "anna",
            "--result",
            "{\"note\": 1}",
            "--force",
        ])
        .expect("cli should parse");

        let Commands::Event(args) = cli.command else {
            panic!("expected event command");
        };
        assert_eq!(args.kind, "mensch-pruefung");
        assert_eq!(args.criterion, "K1");
        assert_eq!(args.actor.as_deref(), Some("anna"));
        assert!(args.force);
    }

    #[test]
    fn schema_defaults_to_audit_document() {
        let cli = Cli::try_parse_from(["krit", "schema"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.target == SchemaTarget::Audit
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["krit", "--root", "/tmp/vergabe", "bidders", "P1"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.root.as_deref(), Some("/tmp/vergabe"));
    }
}
