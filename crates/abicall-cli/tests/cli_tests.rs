//! Integration tests for the abicall CLI
//!
//! These tests invoke the actual abicall binary and verify:
//! - Exit codes (0 = success, 1 = call rejected, 2 = error)
//! - stdout/stderr output
//! - JSON output format
//! - All commands work end-to-end

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

const ADDR: &str = "0x5FfC014343cd971B7eb70732021E26C35B744cc4";

fn abicall_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_abicall"))
}

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/abi/{}", name))
        .to_string_lossy()
        .into_owned()
}

fn run_abicall(args: &[&str]) -> std::process::Output {
    Command::new(abicall_bin())
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute abicall")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("should be valid JSON")
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_abicall(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("abicall"), "should contain 'abicall'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_abicall(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

// ── Parse ─────────────────────────────────────────────────

#[test]
fn test_parse_transfer() {
    let call = format!("transfer({}, 100)", ADDR);
    let output = run_abicall(&["parse", "--abi", &fixture("erc20.json"), &call]);
    assert!(output.status.success(), "valid call should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("transfer(address,uint256)"));
    assert!(stdout.contains("0x5ffc014343cd971b7eb70732021e26c35b744cc4"));
    assert!(stdout.contains("= 100"));
}

#[test]
fn test_parse_transfer_json() {
    let call = format!("transfer({}, 100)", ADDR);
    let output = run_abicall(&["parse", "--json", "--abi", &fixture("erc20.json"), &call]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["method"], "transfer");
    assert_eq!(json["arguments"][0]["name"], "to");
    assert_eq!(json["arguments"][0]["type"], "address");
    assert_eq!(json["arguments"][1]["value"], "100");
}

#[test]
fn test_parse_constructor() {
    let output = run_abicall(&[
        "parse",
        "--json",
        "--abi",
        &fixture("erc20.json"),
        r#"constructor("Token", "TKN", 1000000)"#,
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["method"], "constructor");
    assert_eq!(json["arguments"][1]["value"], "TKN");
}

#[test]
fn test_parse_with_signature() {
    let output = run_abicall(&[
        "parse",
        "--json",
        "--signature",
        "setValues(uint8[])",
        "setValues([1,2,3])",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["arguments"][0]["value"], serde_json::json!([1, 2, 3]));
}

#[test]
fn test_parse_nested_from_artifact() {
    let output = run_abicall(&[
        "parse",
        "--json",
        "--abi",
        &fixture("registry.json"),
        r#"setMatrix([[1,-2],[],[3]], "m")"#,
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(
        json["arguments"][0]["value"],
        serde_json::json!([[1, -2], [], [3]])
    );
    assert_eq!(json["arguments"][0]["type"], "int64[][]");
}

#[test]
fn test_parse_overload() {
    let node = format!("0x{}", "00".repeat(32));
    let call = format!("setRecord0({}, 0xcafe)", node);
    let output = run_abicall(&["parse", "--json", "--abi", &fixture("registry.json"), &call]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["method"], "setRecord");
    assert_eq!(json["signature"], "setRecord(bytes32,bytes)");
    assert_eq!(json["arguments"][1]["value"], "0xcafe");
}

#[test]
fn test_parse_unknown_method() {
    let output = run_abicall(&["parse", "--abi", &fixture("erc20.json"), "mint(1)"]);
    assert_eq!(output.status.code(), Some(1), "unknown method should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
    assert!(stderr.contains("unknown method name mint"));
}

#[test]
fn test_parse_too_many_arguments() {
    let output = run_abicall(&["parse", "--signature", "f(uint256)", "f(1,2)"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too many arguments"));
}

#[test]
fn test_parse_bad_bool_json() {
    let output = run_abicall(&["parse", "--json", "--signature", "f(bool)", "f(notabool)"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert_eq!(json["internal"], false);
    assert!(json["error"].as_str().unwrap().contains("notabool"));
}

#[test]
fn test_parse_fixed_length_mismatch() {
    let node = format!("0x{}", "00".repeat(32));
    let call = format!("setRecord({}, [{}], true)", node, ADDR);
    let output = run_abicall(&["parse", "--abi", &fixture("registry.json"), &call]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("requires 2 elements"));
}

#[test]
fn test_parse_syntax_error() {
    let output = run_abicall(&["parse", "--signature", "f(uint8)", "f(1"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Syntax error"));
}

#[test]
fn test_parse_deep_nesting_rejected() {
    let call = format!("f({}{})", "[".repeat(5000), "]".repeat(5000));
    let output = run_abicall(&["parse", "--signature", "f(uint8[])", &call]);
    assert_eq!(output.status.code(), Some(1), "deep nesting should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nested deeper than 64 levels"));
}

#[test]
fn test_parse_unhandled_type_is_internal() {
    let output = run_abicall(&["parse", "--signature", "f((uint8,bool))", "f(1)"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("internal error"));
}

#[test]
fn test_parse_missing_abi_file() {
    let output = run_abicall(&["parse", "--abi", "nonexistent.json", "f()"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read ABI file"));
}

#[test]
fn test_parse_invalid_abi() {
    let output = run_abicall(&["parse", "--abi", &fixture("invalid-type.json"), "broken(1)"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("uint7"));
}

#[test]
fn test_parse_requires_interface() {
    let output = run_abicall(&["parse", "f()"]);
    assert_eq!(output.status.code(), Some(2), "usage error should exit 2");
}

// ── Values ────────────────────────────────────────────────

#[test]
fn test_values_json() {
    let data = format!("false,2,{}", ADDR);
    let output = run_abicall(&[
        "values",
        "--json",
        "--types",
        "bool,uint256,address",
        "--data",
        &data,
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["values"][0]["value"], false);
    assert_eq!(json["values"][1]["type"], "uint256");
    assert_eq!(json["values"][1]["value"], "2");
}

#[test]
fn test_values_text() {
    let output = run_abicall(&["values", "--types", "string,uint8[]", "--data", r#""hi",[4,5]"#]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"hi\""));
    assert!(stdout.contains("[4, 5]"));
}

#[test]
fn test_values_range_error() {
    let output = run_abicall(&["values", "--types", "uint8", "--data", "256"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range for uint8"));
}

#[test]
fn test_values_invalid_types() {
    let output = run_abicall(&["values", "--types", "uint7", "--data", "1"]);
    assert_eq!(output.status.code(), Some(2));
}

// ── Methods ───────────────────────────────────────────────

#[test]
fn test_methods_text() {
    let output = run_abicall(&["methods", "--abi", &fixture("erc20.json")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("constructor(string,string,uint256)"));
    assert!(stdout.contains("approve(address,uint256)"));
    assert!(stdout.contains("totalSupply()"));
    assert!(!stdout.contains("Transfer("));
}

#[test]
fn test_methods_json_overloads() {
    let output = run_abicall(&["methods", "--json", "--abi", &fixture("registry.json")]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    let methods = json["methods"].as_array().unwrap();
    let names: Vec<&str> = methods.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["setMatrix", "setRecord", "setRecord0", "setValues"]);
    assert_eq!(methods[2]["signature"], "setRecord(bytes32,bytes)");
}
