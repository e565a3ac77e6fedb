//! Behavioural smoke tests for the `cloudstack` entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

const UNREACHABLE_API: &str = "http://127.0.0.1:9/client/api";

#[test]
fn cli_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("cloudstack");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("call"))
        .stdout(contains("wait"));
}

#[test]
fn cli_without_api_url_reports_configuration_error() {
    let mut cmd = cargo_bin_cmd!("cloudstack");
    cmd.env_remove("CLOUDSTACK_API_URL");
    cmd.args(["wait", "job-1"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(contains("configuration"));
}

#[test]
fn cli_rejects_malformed_parameters_before_sending() {
    let mut cmd = cargo_bin_cmd!("cloudstack");
    cmd.env("CLOUDSTACK_API_URL", UNREACHABLE_API);
    cmd.args(["call", "listZones", "available"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(contains("expected key=value"));
}
