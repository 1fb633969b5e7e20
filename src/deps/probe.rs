//! Python import probing.
//!
//! The reconstruction tool is a Python program, so "is this dependency
//! installed" means "can the configured interpreter import it". The probe is
//! a trait so the checker can be exercised against synthetic environments in
//! tests without spawning an interpreter.

use std::process::{Command, Stdio};

/// Answers whether a Python package is importable.
pub trait ImportProbe {
    /// Check whether `package` can be imported in the probe's environment.
    fn is_importable(&self, package: &str) -> bool;
}

/// Find a usable Python interpreter on PATH.
///
/// Tries `python3` then `python`, keeping the first whose `--version`
/// exits 0. Falls back to `python3` when neither responds, so later
/// probe failures name the conventional interpreter.
pub fn discover_interpreter() -> String {
    for candidate in ["python3", "python"] {
        if interpreter_responds(candidate) {
            tracing::debug!(interpreter = candidate, "discovered interpreter");
            return candidate.to_string();
        }
    }
    "python3".to_string()
}

/// Check whether an interpreter answers `--version` successfully.
fn interpreter_responds(interpreter: &str) -> bool {
    Command::new(interpreter)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Probe backed by a real Python interpreter.
///
/// Runs `<python> -c "import <package>"` with stdio discarded; only the exit
/// status is consumed.
pub struct PythonProbe {
    interpreter: String,
}

impl PythonProbe {
    /// Create a probe for a specific interpreter.
    pub fn new(interpreter: &str) -> Self {
        Self {
            interpreter: interpreter.to_string(),
        }
    }

    /// The interpreter this probe shells out to.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Interpreter version, extracted from `--version` output.
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.interpreter)
            .arg("--version")
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }

        // Python 2 printed the version to stderr; check both streams.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        extract_version(&stdout).or_else(|| extract_version(&stderr))
    }
}

impl ImportProbe for PythonProbe {
    fn is_importable(&self, package: &str) -> bool {
        Command::new(&self.interpreter)
            .arg("-c")
            .arg(format!("import {}", package))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }
}

/// Extract a version number from interpreter output.
fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}
