// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::Path};

use assert_cmd::Command;

const MANIFEST: &str = r#"
[deploy]
contract = "NFTArena"

[networks.sepolia]
chain-id = 11155111
url = "https://eth-sepolia.example.com/v2/secret-api-key"
accounts = ["ARENA_TEST_SEPOLIA_KEY"]
"#;

const ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "NFTArena",
  "sourceName": "contracts/NFTArena.sol",
  "abi": [
    {
      "type": "constructor",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "subscriptionId", "type": "uint256", "internalType": "uint256" },
        { "name": "vrfCoordinator", "type": "address", "internalType": "address" },
        { "name": "keyHash", "type": "bytes32", "internalType": "bytes32" }
      ]
    }
  ],
  "bytecode": "0x6001600c60003960016000f300",
  "deployedBytecode": "0x00",
  "linkReferences": {},
  "deployedLinkReferences": {}
}
"#;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Arena.toml"), MANIFEST).unwrap();
    let artifacts = dir.path().join("artifacts/contracts/NFTArena.sol");
    fs::create_dir_all(&artifacts).unwrap();
    fs::write(artifacts.join("NFTArena.json"), ARTIFACT).unwrap();
    dir
}

fn arena_deploy(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("arena-deploy").unwrap();
    cmd.current_dir(dir)
        .env_remove("PRIVATE_KEY")
        .env_remove("ARENA_TEST_SEPOLIA_KEY");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn unknown_network_fails_without_writing() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .args(["deploy", "--network", "mainnet"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("unknown network"), "{stderr}");
    assert!(stderr.contains("localhost, sepolia"), "{stderr}");
    assert!(!dir.path().join("src/contract_data").exists());
}

#[test]
fn missing_artifact_fails() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .args(["deploy", "--contract", "Missing"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("Missing"), "{stderr}");
}

#[test]
fn networks_are_listed_without_secrets() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .env("ARENA_TEST_SEPOLIA_KEY", "0xdeadbeef")
        .arg("networks")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("localhost"), "{stdout}");
    assert!(stdout.contains("11155111"), "{stdout}");
    assert!(stdout.contains("https://eth-sepolia.example.com"), "{stdout}");
    assert!(!stdout.contains("secret-api-key"), "{stdout}");
    assert!(!stdout.contains("deadbeef"), "{stdout}");
}

#[test]
fn constructor_signature_is_printed() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .arg("constructor")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "constructor(uint256 subscriptionId, address vrfCoordinator, bytes32 keyHash)"
    );
}

#[test]
fn publish_writes_files_for_existing_address() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .args([
            "publish",
            "--address",
            "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "--abi-only",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let out = dir.path().join("src/contract_data");
    let address = fs::read_to_string(out.join("NFTArena-address.json")).unwrap();
    assert_eq!(
        address,
        "{\n  \"address\": \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"\n}\n"
    );
    let abi: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("NFTArena.json")).unwrap()).unwrap();
    assert_eq!(abi[0]["type"], "constructor");
}

#[test]
fn explicit_config_must_exist() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .args(["--config", "Missing.toml", "networks"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Missing.toml"));
}

#[test]
fn deploy_without_signing_key_fails() {
    let dir = project();
    let output = arena_deploy(dir.path())
        .args([
            "deploy",
            "--network",
            "sepolia",
            "--constructor-args",
            "1",
            "0x9DdfaCa8183c41ad55329BdeeD9F6A8d53168B1B",
            "0x787d74caea10b2b357790d5b5247c2f63d1d91572a9846f780606e4d953677ae",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("sepolia"), "{stderr}");
    assert!(!dir.path().join("src/contract_data").exists());
}
