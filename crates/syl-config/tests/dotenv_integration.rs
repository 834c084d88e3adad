//! `.env` values flow through the figment chain.
//!
//! Kept in its own test binary: dotenvy writes to the process environment,
//! which Jail does not restore.

use figment::Jail;
use std::path::PathBuf;
use syl_config::SyllabusConfig;

#[test]
fn dotenv_file_is_read() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "SYLLABUS_OUTPUT__DIR=dotenv-out\n")?;

        let config = SyllabusConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.output.dir, PathBuf::from("dotenv-out"));
        Ok(())
    });
}
