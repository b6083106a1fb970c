use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const MANIFEST: &str = r#"version: "1.0"
exclude:
  - legacy
commands:
  - signature: |
      make:
        {controller : Generate a [name] controller | {--a|api : API controller}}
        {model : Generate a model}
        {#stub : Internal stub}
        {^name : The name of the [name]}
        {^--force? : Overwrite the [name]}
    description: Code generators
    handler: generate
  - signature: "serve {host? : Host} {--p|port=8000 : Port to listen on}"
    description: Start the development server
  - signature: "legacy {name : Old command}"
"#;

fn sigc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sigc"))
        .args(args)
        .output()
        .expect("failed to run sigc")
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write manifest");
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_parse_file_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("make.sig");
    fs::write(&input, "make:\n  {controller : c}\n  {^--force : f}\n").unwrap();

    let output = sigc(&[
        "parse",
        "--input",
        path_arg(&input),
        "--description",
        "Generators",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["base_command"], "make");
    assert_eq!(json["description"], "Generators");
    assert_eq!(json["is_namespace_command"], true);
    assert_eq!(json["sub_commands"][0]["name"], "controller");
    assert_eq!(json["options"][0]["shared"], true);
}

#[test]
fn test_parse_stdin_table() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sigc"))
        .args(["parse", "--format", "table"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sigc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"serve {--p|port=8000 : Port}")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Command: serve"));
    assert!(text.contains("-p, --port"));
}

#[test]
fn test_parse_missing_file_fails() {
    let output = sigc(&["parse", "--input", "/nonexistent/signature.sig"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: Failed to read"));
}

#[test]
fn test_build_manifest_json() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "commands.yml", MANIFEST);

    let output = sigc(&["build", "--manifest", path_arg(&manifest)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let commands = json["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0]["name"], "make");
    assert_eq!(commands[0]["handler"], "generate");

    let controller = &commands[0]["sub_commands"][0];
    assert_eq!(controller["name"], "make:controller");
    assert_eq!(controller["description"], "Generate a controller controller");
    assert_eq!(controller["sub_command"], "controller");

    let children: Vec<_> = commands[0]["sub_commands"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(children, vec!["make:controller", "make:model"]);
}

#[test]
fn test_build_markdown() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "commands.yml", MANIFEST);

    let output = sigc(&["build", "--manifest", path_arg(&manifest), "--format", "markdown"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("# make"));
    assert!(text.contains("## make:controller"));
    assert!(text.contains("`-p, --port <port>`"));
}

#[test]
fn test_build_strict_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &dir,
        "dupes.yml",
        "commands:\n  - signature: \"serve {host? : Host}\"\n  - signature: \"serve {--p|port : Port}\"\n",
    );

    let lenient = sigc(&["build", "--manifest", path_arg(&manifest)]);
    assert!(lenient.status.success(), "stderr: {}", stderr(&lenient));
    let json: serde_json::Value = serde_json::from_str(&stdout(&lenient)).unwrap();
    assert_eq!(json["commands"].as_array().unwrap().len(), 1);
    assert_eq!(json["commands"][0]["flags"][0]["name"], "port");

    let strict = sigc(&["build", "--manifest", path_arg(&manifest), "--strict"]);
    assert!(!strict.status.success());
    assert!(stderr(&strict).contains("duplicate command registration: serve"));
}

#[test]
fn test_build_json_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &dir,
        "commands.json",
        r#"{"commands": [{"signature": "serve {--watch : Watch}", "handler": "http"}]}"#,
    );

    let output = sigc(&["build", "--manifest", path_arg(&manifest)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["commands"][0]["handler"], "http");
}

#[test]
fn test_build_invalid_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "broken.yml", "commands:\n  - signature: \"\"\n");

    let output = sigc(&["build", "--manifest", path_arg(&manifest)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("empty signature"));
}

#[test]
fn test_validate_ok() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "commands.yml", MANIFEST);

    let output = sigc(&["validate", "--manifest", path_arg(&manifest)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Validated 2 command(s)"));
}

#[test]
fn test_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &dir,
        "bad.yml",
        "commands:\n  - signature: \"serve {--p|port : Port}\"\n  - signature: \"serve {--|p : Port}\"\n",
    );

    let output = sigc(&["validate", "--manifest", path_arg(&manifest)]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("invalid flag alias: --"));
    assert!(err.contains("duplicate command: serve"));
    assert!(!err.contains("empty option name"));
    assert!(err.contains("error: 2 validation error(s)"));
}

#[test]
fn test_route_resolves_handler() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "commands.yml", MANIFEST);

    let output = sigc(&["route", "--manifest", path_arg(&manifest), "make:model"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "make:model -> generate (model)");

    let missing = sigc(&["route", "--manifest", path_arg(&manifest), "make:stub"]);
    assert!(!missing.status.success());
    assert!(stderr(&missing).contains("Unknown command 'make:stub'"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "commands.yml", MANIFEST);

    let output = sigc(&["-v", "build", "--manifest", path_arg(&manifest)]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Compiled signature"));
    serde_json::from_str::<serde_json::Value>(&stdout(&output))
        .expect("stdout stays pure JSON when logging");
}
