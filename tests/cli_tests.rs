#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::fake_bdy;
use predicates::prelude::*;
use std::path::Path;

fn action(bdy: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bdy_package_publish").unwrap();
    cmd.env("BDY_PATH", bdy)
        .env("INPUT_WORKSPACE", "acme")
        .env("INPUT_PROJECT", "web")
        .env("INPUT_IDENTIFIER", "my-pkg")
        .env("INPUT_DIRECTORY", "./dist")
        .env_remove("INPUT_CREATE")
        .env_remove("INPUT_FORCE")
        .env_remove("INPUT_REGION")
        .env_remove("INPUT_API")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_ENV");
    cmd
}

#[test]
fn missing_token_fails_the_step() {
    let dir = tempfile::tempdir().unwrap();
    let bdy = fake_bdy(dir.path(), "unused");

    action(&bdy)
        .env_remove("BUDDY_TOKEN")
        .env("BUDDY_API_ENDPOINT", "api.buddy.works")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "::error::BUDDY_TOKEN is not set. Please use the buddy/login@v1 action before publishing packages.",
        ));

    assert!(!dir.path().join("args.txt").exists());
}

#[test]
fn missing_input_fails_after_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let bdy = fake_bdy(dir.path(), "unused");

    action(&bdy)
        .env("BUDDY_TOKEN", "s3cret")
        .env("BUDDY_API_ENDPOINT", "api.buddy.works")
        .env_remove("INPUT_DIRECTORY")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("::add-mask::s3cret"))
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: directory",
        ));
}

#[test]
fn successful_publish_sets_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let bdy = fake_bdy(dir.path(), "Published! https://buddy.works/pkg/123 done");
    let output_file = dir.path().join("github_output");
    std::fs::write(&output_file, "").unwrap();

    action(&bdy)
        .env("BUDDY_TOKEN", "s3cret")
        .env("BUDDY_API_ENDPOINT", "api.buddy.works")
        .env("INPUT_CREATE", "true")
        .env("INPUT_FORCE", "sometimes")
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "BDY CLI is already installed (version: 2.3.1)",
        ))
        .stdout(predicate::str::contains(
            "::warning::Invalid boolean value for input 'force': 'sometimes'. Defaulting to false",
        ))
        .stdout(predicate::str::contains("Package published successfully"))
        .stdout(predicate::str::contains(
            "::set-env name=BUDDY_PACKAGE_URL::https://buddy.works/pkg/123",
        ));

    let outputs = std::fs::read_to_string(&output_file).unwrap();
    assert!(outputs.contains("\nhttps://buddy.works/pkg/123\n"));
}
