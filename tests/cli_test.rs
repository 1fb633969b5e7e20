//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Write an executable script into the project dir.
#[cfg(unix)]
fn write_script(temp: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A fake interpreter that can import everything and exits 0 when run as
/// the reconstruction tool.
#[cfg(unix)]
fn fake_python_ok(temp: &TempDir) -> std::path::PathBuf {
    write_script(temp, "fake-python", "exit 0")
}

/// A fake interpreter where `import ghostlib` fails but everything else
/// succeeds.
#[cfg(unix)]
fn fake_python_missing_ghostlib(temp: &TempDir) -> std::path::PathBuf {
    write_script(
        temp,
        "fake-python",
        r#"case "$2" in
  *ghostlib*) exit 1 ;;
  *) exit 0 ;;
esac"#,
    )
}

#[cfg(unix)]
fn setup_project(temp: &TempDir, python: &std::path::Path, extra_config: &str) {
    fs::create_dir_all(temp.path().join("input")).unwrap();
    fs::write(temp.path().join("input/photo.png"), b"\x89PNG").unwrap();
    fs::write(temp.path().join("run.py"), "print('tool')").unwrap();
    fs::write(
        temp.path().join("plinth.yml"),
        format!(
            "python: {}\nentrypoint: {}\n{}",
            python.display(),
            temp.path().join("run.py").display(),
            extra_config
        ),
    )
    .unwrap();
}

fn plinth() -> Command {
    let mut cmd = Command::new(cargo_bin("plinth"));
    // Force the non-interactive UI so output streams are deterministic
    cmd.env("CI", "true");
    cmd
}

#[test]
fn cli_shows_help() {
    plinth()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("single-image 3D reconstruction"));
}

#[test]
fn cli_shows_version() {
    plinth()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_generate_bash() {
    plinth()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plinth"));
}

#[test]
#[cfg(unix)]
fn check_reports_all_found() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 6 required packages found"));
}

#[test]
#[cfg(unix)]
fn check_reports_missing_subset() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_missing_ghostlib(&temp);
    setup_project(
        &temp,
        &python,
        "required_packages:\n  - torch\n  - ghostlib\n",
    );

    plinth()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("- ghostlib"))
        .stderr(predicate::str::contains("1 of 2 required packages missing"));
}

#[test]
#[cfg(unix)]
fn check_json_output() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_missing_ghostlib(&temp);
    setup_project(
        &temp,
        &python,
        "required_packages:\n  - torch\n  - ghostlib\n",
    );

    plinth()
        .current_dir(temp.path())
        .args(["check", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"ghostlib\""))
        .stdout(predicate::str::contains("\"found\": false"));
}

#[test]
#[cfg(unix)]
fn run_dry_run_prints_fixed_argument_order() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "device: cpu\n");

    let run_py = temp.path().join("run.py").display().to_string();
    plinth()
        .current_dir(temp.path())
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{} input/photo.png --output-dir output --device cpu --no-bake-texture",
            run_py
        )));
}

#[test]
#[cfg(unix)]
fn run_creates_workspace_directories() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .args(["run", "--dry-run"])
        .assert()
        .success();

    assert!(temp.path().join("input").is_dir());
    assert!(temp.path().join("output").is_dir());
}

#[test]
#[cfg(unix)]
fn run_succeeds_when_tool_exits_zero() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reconstruction finished"));
}

#[test]
#[cfg(unix)]
fn run_is_the_default_command() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Reconstruction finished"));
}

#[test]
#[cfg(unix)]
fn run_propagates_tool_exit_code() {
    let temp = TempDir::new().unwrap();
    // Imports succeed; running the tool (no -c flag) exits 5
    let python = write_script(
        &temp,
        "fake-python",
        r#"if [ "$1" = "-c" ]; then exit 0; fi
exit 5"#,
    );
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Reconstruction failed"));
}

#[test]
#[cfg(unix)]
fn run_aborts_before_tool_on_missing_packages() {
    let temp = TempDir::new().unwrap();
    // Imports of ghostlib fail; the tool would create a marker if spawned
    let marker = temp.path().join("tool-ran");
    let python = write_script(
        &temp,
        "fake-python",
        &format!(
            r#"if [ "$1" = "-c" ]; then
  case "$2" in *ghostlib*) exit 1 ;; *) exit 0 ;; esac
fi
touch {}
exit 0"#,
            marker.display()
        ),
    );
    setup_project(
        &temp,
        &python,
        "required_packages:\n  - torch\n  - ghostlib\n",
    );

    plinth()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("- ghostlib"));

    assert!(!marker.exists(), "tool must not run with missing packages");
}

#[test]
#[cfg(unix)]
fn run_fails_without_input_image() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");
    fs::remove_file(temp.path().join("input/photo.png")).unwrap();

    plinth()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input image not found"));
}

#[test]
fn invalid_config_device_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("plinth.yml"), "device: tpu\n").unwrap();

    plinth()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
#[cfg(unix)]
fn cli_device_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "device: cpu\n");

    plinth()
        .current_dir(temp.path())
        .args(["run", "--dry-run", "--device", "cuda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--device cuda"));
}

#[test]
#[cfg(unix)]
fn bake_texture_flag_omits_no_bake_texture() {
    let temp = TempDir::new().unwrap();
    let python = fake_python_ok(&temp);
    setup_project(&temp, &python, "");

    plinth()
        .current_dir(temp.path())
        .args(["run", "--dry-run", "--bake-texture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-bake-texture").not());
}
