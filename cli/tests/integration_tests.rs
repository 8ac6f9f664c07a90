use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("clargs_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const BUILD_CATALOG_YAML: &str = r#"options:
  - short: f
    long: file
    flags: [argument_required]
    description: the build file.
  - short: D
    long: define
    flags: [arguments_required2, duplicates_allowed]
  - short: a
    long: all
    flags: [argument_disallowed]
    incompatible: [b]
  - short: b
    long: blee
    flags: [argument_disallowed]
  - short: v
    long: verbose
    flags: [argument_disallowed]
  - id: 1000
    long: color
    flags: [argument_optional]
"#;

fn write_catalog(dir: &TempDir, name: &str, raw: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, raw).expect("failed to write catalog");
    path
}

fn run_clargs(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_clargs"))
        .args(args)
        .output()
        .expect("failed to run clargs")
}

fn run_parse(catalog: &PathBuf, extra: &[&str], parsed: &[&str]) -> Output {
    let mut args = vec!["parse", "--catalog", catalog.to_str().unwrap()];
    args.extend_from_slice(extra);
    args.push("--");
    args.extend_from_slice(parsed);
    run_clargs(&args)
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "stdout is not JSON ({err}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_reports_occurrences_as_json() {
    let dir = TempDir::new("parse_json");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(
        &catalog,
        &[],
        &["-va", "--file=build.xml", "-Dversion=1-2", "target"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = stdout_json(&output);
    assert_eq!(report["success"], true);
    let occurrences = report["occurrences"].as_array().unwrap();
    assert_eq!(occurrences.len(), 5);
    assert_eq!(occurrences[0]["option"], "-v/--verbose");
    assert_eq!(occurrences[1]["id"], "a");
    assert_eq!(occurrences[2]["arguments"], serde_json::json!(["build.xml"]));
    assert_eq!(
        occurrences[3]["arguments"],
        serde_json::json!(["version", "1-2"])
    );
    assert!(occurrences[4]["id"].is_null());
    assert_eq!(occurrences[4]["arguments"], serde_json::json!(["target"]));
}

#[test]
fn parse_long_only_option() {
    let dir = TempDir::new("parse_long_only");
    let catalog = write_catalog(&dir, "build.yml", BUILD_CATALOG_YAML);

    let output = run_parse(&catalog, &[], &["--color=always"]);
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["occurrences"][0]["id"], 1000);
    assert_eq!(report["occurrences"][0]["option"], "--color");
}

#[test]
fn parse_error_exits_with_code_two() {
    let dir = TempDir::new("parse_error");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(&catalog, &[], &["--all", "--blee"]);
    assert_eq!(output.status.code(), Some(2));

    let report = stdout_json(&output);
    assert_eq!(report["success"], false);
    assert_eq!(
        report["error"],
        "Incompatible options -b/--blee and -a/--all found."
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: Incompatible options"),
        "stderr: {stderr}"
    );
}

#[test]
fn parse_unknown_option_exits_with_code_two() {
    let dir = TempDir::new("parse_unknown");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(&catalog, &[], &["-z"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["error"], "Unknown option -z");
}

#[test]
fn parse_halt_after_returns_remainder() {
    let dir = TempDir::new("parse_halt");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(
        &catalog,
        &["--halt-after", "verbose"],
        &["-a", "-vb", "rest"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = stdout_json(&output);
    assert_eq!(report["occurrences"].as_array().unwrap().len(), 2);
    assert_eq!(report["unparsed"], serde_json::json!(["-b", "rest"]));
}

#[test]
fn parse_yaml_output() {
    let dir = TempDir::new("parse_yaml_out");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(&catalog, &["--format", "yaml"], &["-f", "out.txt"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("success: true"), "stdout: {stdout}");
    assert!(stdout.contains("option: -f/--file"), "stdout: {stdout}");
    assert!(stdout.contains("- out.txt"), "stdout: {stdout}");
}

#[test]
fn parse_json_catalog() {
    let dir = TempDir::new("parse_json_catalog");
    let catalog = write_catalog(
        &dir,
        "opts.json",
        r#"{"options": [{"short": "T", "long": "taint", "flags": ["argument_optional"]}]}"#,
    );

    let output = run_parse(&catalog, &[], &["-T", "param"]);
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["occurrences"][0]["arguments"], serde_json::json!([]));
    assert_eq!(report["occurrences"][1]["arguments"], serde_json::json!(["param"]));
}

#[test]
fn parse_rejects_unknown_halt_reference() {
    let dir = TempDir::new("parse_bad_halt");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_parse(&catalog, &["--halt-after", "nothing"], &["-a"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_lists_options() {
    let dir = TempDir::new("check_ok");
    let catalog = write_catalog(&dir, "build.yaml", BUILD_CATALOG_YAML);

    let output = run_clargs(&["check", "--catalog", catalog.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-f/--file"), "stdout: {stdout}");
    assert!(stdout.contains("the build file."), "stdout: {stdout}");
    assert!(stdout.contains("Validated 6 option(s)"), "stdout: {stdout}");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("warning"));
}

#[test]
fn check_warns_about_dangling_references() {
    let dir = TempDir::new("check_dangling");
    let catalog = write_catalog(
        &dir,
        "opts.yaml",
        "options:\n  - short: v\n    long: verbose\n    flags: [argument_disallowed]\n    incompatible: [q]\n",
    );

    let output = run_clargs(&["check", "--catalog", catalog.to_str().unwrap()]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("warning: -v/--verbose lists undefined option -q"),
        "stderr: {stderr}"
    );
}

#[test]
fn check_rejects_invalid_catalog() {
    let dir = TempDir::new("check_invalid");
    let catalog = write_catalog(
        &dir,
        "opts.json",
        r#"{"options": [{"short": "x", "flags": ["argument_required", "argument_optional"]}]}"#,
    );

    let output = run_clargs(&["check", "--catalog", catalog.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: multiple modes specified for option -x"),
        "stderr: {stderr}"
    );
}

#[test]
fn check_missing_file() {
    let dir = TempDir::new("check_missing");
    let missing = dir.join("absent.json");

    let output = run_clargs(&["check", "--catalog", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
