//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use wicket_config::{ConfigError, WicketConfig};

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gemini]
api_key = "toml-key"
model = "gemini-2.5-pro"
request_timeout_secs = 30

[limits]
daily_limit = 100
min_call_interval_ms = 250
max_retries = 5
retry_base_delay_secs = 2
max_deep_steps = 8

[database]
path = "/data/ipl.duckdb"

[server]
bind_addr = "0.0.0.0:9000"

[publish]
output_dir = "site/projects"
default_author = "Stats Desk"
"#,
        )?;

        let config: WicketConfig = Figment::from(Serialized::defaults(WicketConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.gemini.is_configured());
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.request_timeout_secs, 30);
        assert_eq!(config.limits.daily_limit, 100);
        assert_eq!(config.limits.min_call_interval_ms, 250);
        assert_eq!(config.limits.max_retries, 5);
        assert_eq!(config.limits.retry_base_delay_secs, 2);
        assert_eq!(config.limits.max_deep_steps, 8);
        assert_eq!(config.database.path, PathBuf::from("/data/ipl.duckdb"));
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.publish.output_dir, PathBuf::from("site/projects"));
        assert_eq!(config.publish.default_author, "Stats Desk");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[limits]
daily_limit = 20
",
        )?;

        let config: WicketConfig = Figment::from(Serialized::defaults(WicketConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.limits.daily_limit, 20);
        assert_eq!(config.limits.max_retries, 3);
        assert_eq!(config.gemini.model, "gemini-2.5-flash-lite");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gemini]
model = "from-toml"
"#,
        )?;
        jail.set_env("WICKET_GEMINI__MODEL", "from-env");

        let config: WicketConfig = Figment::from(Serialized::defaults(WicketConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("WICKET_").split("__"))
            .extract()?;

        assert_eq!(config.gemini.model, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".wicket")?;
        jail.create_file(
            ".wicket/config.toml",
            r#"
[server]
bind_addr = "127.0.0.1:8123"
"#,
        )?;

        let config = WicketConfig::load().expect("config loads");
        assert_eq!(config.server.bind_addr, "127.0.0.1:8123");
        Ok(())
    });
}

#[test]
fn zero_retries_in_toml_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[limits]
max_retries = 0
",
        )?;

        let figment = Figment::from(Serialized::defaults(WicketConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = WicketConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "limits.max_retries"
        ));
        Ok(())
    });
}
