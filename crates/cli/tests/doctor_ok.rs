use std::fmt::Write;
use std::fs;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn doctor_reports_resolved_profile() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();

    let cfg_path = tmp.path().join("config.toml");
    let mut toml = String::new();
    writeln!(&mut toml, "version = 1").unwrap();
    writeln!(&mut toml, "profile = \"default\"").unwrap();
    writeln!(&mut toml).unwrap();
    writeln!(&mut toml, "[profiles.default]").unwrap();
    writeln!(&mut toml, "vault_root = \"{}\"", vault.display()).unwrap();
    writeln!(&mut toml, "index_prefix = \"Index_\"").unwrap();
    fs::write(&cfg_path, toml).unwrap();

    assert_cmd::Command::cargo_bin("vkp")
        .unwrap()
        .args(["--config", cfg_path.to_str().unwrap(), "doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   vaultkeeper doctor"))
        .stdout(predicate::str::contains("profile: default"))
        .stdout(predicate::str::contains("index_prefix: Index_"));
}
