//! Dependency verification for the external reconstruction tool.
//!
//! The tool runs in a Python environment Plinth does not manage; before
//! launching, every required package is probed for importability and the
//! full missing set is reported at once.

pub mod checker;
pub mod probe;

pub use checker::{check_packages, ensure_packages, DependencyReport, PackageStatus};
pub use probe::{discover_interpreter, ImportProbe, PythonProbe};
