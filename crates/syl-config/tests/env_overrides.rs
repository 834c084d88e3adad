//! Environment variables override TOML and defaults.

use figment::Jail;
use std::path::PathBuf;
use syl_config::{ConfigError, SyllabusConfig};

#[test]
fn env_overrides_scalars() {
    Jail::expect_with(|jail| {
        jail.set_env("SYLLABUS_RESOLVER__STRONG_MATCH_THRESHOLD", "1.5");
        jail.set_env("SYLLABUS_MERGE__SORT_OBSERVATIONS", "false");
        jail.set_env("SYLLABUS_OUTPUT__DIR", "env-out");

        let config = SyllabusConfig::load().expect("config loads");
        assert!((config.resolver.strong_match_threshold - 1.5).abs() < f64::EPSILON);
        assert!(!config.merge.sort_observations);
        assert_eq!(config.output.dir, PathBuf::from("env-out"));
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".syllabus")?;
        jail.create_file(
            ".syllabus/config.toml",
            r#"
[resolver]
resolve_all_semesters = false
"#,
        )?;
        jail.set_env("SYLLABUS_RESOLVER__RESOLVE_ALL_SEMESTERS", "true");

        let config = SyllabusConfig::load().expect("config loads");
        assert!(config.resolver.resolve_all_semesters);
        Ok(())
    });
}

#[test]
fn log_filter_variable_does_not_break_loading() {
    Jail::expect_with(|jail| {
        jail.set_env("SYLLABUS_LOG", "debug");
        assert!(SyllabusConfig::load().is_ok());
        Ok(())
    });
}

#[test]
fn invalid_env_threshold_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SYLLABUS_RESOLVER__STRONG_MATCH_THRESHOLD", "0");

        assert!(matches!(
            SyllabusConfig::load(),
            Err(ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}
