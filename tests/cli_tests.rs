use assert_cmd::Command;
use serde_json::Value;
use std::io::Write;

const MNEMONIC_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("account-cli").unwrap();
    cmd.env_remove("ACCOUNT_BECH32_PREFIX")
        .env_remove("ACCOUNT_LEGACY_BECH32_PREFIX")
        .env_remove("ACCOUNT_HD_PATH");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn test_cli_recover() {
    let out = json_stdout(cli().args(["recover", "--words", MNEMONIC_12]));
    assert_eq!(out["address"], "d01npvwllfr9dqr8erajqqr6s0vxnk2ak55twavxs");
    assert_eq!(out["legacy_address"], "dx1gsvdpdxec8hsu57lhxg5xem7refr233z6gelgp");
}

#[test]
fn test_cli_generate() {
    let out = json_stdout(cli().args(["generate", "--show-mnemonic"]));
    assert!(out["address"].as_str().unwrap().starts_with("d01"));
    assert_eq!(out["mnemonic"].as_str().unwrap().split(' ').count(), 24);
}

#[test]
fn test_cli_sign_and_verify() {
    let signed = json_stdout(cli().args(["sign", "--words", MNEMONIC_12, "--message", "0x0102"]));
    let signature = signed["signature"].as_str().unwrap().to_string();
    let pubkey = signed["public_key"].as_str().unwrap().to_string();

    let verified = json_stdout(cli().args([
        "verify",
        "--pubkey",
        &pubkey,
        "--message",
        "0102",
        "--signature",
        &signature,
    ]));
    assert_eq!(verified["valid"], true);
}

#[test]
fn test_cli_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bech32_prefix = \"t0\"\nlegacy_bech32_prefix = \"tx\"").unwrap();

    let out = json_stdout(cli().args(["--config"]).arg(file.path()).args(["recover", "--words", MNEMONIC_12]));
    assert!(out["address"].as_str().unwrap().starts_with("t01"));
    assert!(out["legacy_address"].as_str().unwrap().starts_with("tx1"));
}

#[test]
fn test_cli_bad_mnemonic_fails() {
    cli()
        .args(["recover", "--words", "not a mnemonic"])
        .assert()
        .failure();
}
