//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use krit_config::KritConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_paths_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
projects_root = "/srv/vergabe"
criteria_file = "kriterien_v2.json"
bidders_dir = "angebote"
audit_file = "audit.json"
"#,
        )?;

        let config: KritConfig = Figment::from(Serialized::defaults(KritConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.projects_root, "/srv/vergabe");
        assert_eq!(config.paths.criteria_file, "kriterien_v2.json");
        assert_eq!(config.paths.bidders_dir, "angebote");
        assert_eq!(config.paths.audit_file, "audit.json");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
sync_actor = "nightly-sync"
"#,
        )?;

        let config: KritConfig = Figment::from(Serialized::defaults(KritConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.sync_actor, "nightly-sync");
        assert_eq!(config.general.default_actor, "api");
        assert_eq!(config.paths.bidders_dir, "bieter");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".krit")?;
        jail.create_file(
            ".krit/config.toml",
            r#"
[paths]
projects_root = "projekte"
"#,
        )?;

        let config = KritConfig::load().expect("config loads");
        assert_eq!(config.paths.projects_root, "projekte");
        Ok(())
    });
}

#[test]
fn invalid_toml_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".krit")?;
        jail.create_file(
            ".krit/config.toml",
            r#"
[paths]
audit_file = "../escape.json"
"#,
        )?;

        let err = KritConfig::load().expect_err("should reject nested audit file");
        assert!(err.to_string().contains("paths.audit_file"));
        Ok(())
    });
}
