//! Configuration schema definitions.
//!
//! [`PipelineConfig`] is the fully-resolved configuration handed to the
//! launcher. [`ConfigFile`] mirrors it with every field optional, matching
//! what may appear in `plinth.yml`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default list of Python packages the reconstruction tool imports.
pub const DEFAULT_REQUIRED_PACKAGES: [&str; 6] = [
    "torch",
    "torchvision",
    "numpy",
    "trimesh",
    "rembg",
    "transformers",
];

/// Compute device passed to the reconstruction tool.
///
/// No hardware probing happens here; the operator picks the variant that
/// matches their environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// GPU-accelerated inference.
    #[default]
    Cuda,
    /// CPU fallback.
    Cpu,
}

impl Device {
    /// The value passed to the tool's `--device` flag.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cuda" => Ok(Self::Cuda),
            "cpu" => Ok(Self::Cpu),
            _ => Err(format!("unknown device: {} (expected 'cuda' or 'cpu')", s)),
        }
    }
}

/// Fully-resolved pipeline configuration.
///
/// Defaults describe the conventional project layout; every field can be
/// overridden by `plinth.yml` or CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Image handed to the reconstruction tool.
    pub input_image: PathBuf,

    /// Staging directory for input images.
    pub input_dir: PathBuf,

    /// Directory the tool writes meshes into.
    pub output_dir: PathBuf,

    /// Compute device selector.
    pub device: Device,

    /// Whether the tool should bake a texture. Off by default; the launcher
    /// passes `--no-bake-texture` when this is false.
    pub bake_texture: bool,

    /// Python interpreter used for both import probing and the tool itself.
    pub python: String,

    /// Entrypoint script of the external reconstruction tool.
    pub entrypoint: PathBuf,

    /// Python packages that must be importable before launching.
    pub required_packages: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_image: PathBuf::from("input/photo.png"),
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            device: Device::default(),
            bake_texture: false,
            python: "python3".to_string(),
            entrypoint: PathBuf::from("vendor/triposr/run.py"),
            required_packages: DEFAULT_REQUIRED_PACKAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Raw configuration file contents (`plinth.yml`).
///
/// Every field is optional; absent fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input_image: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub device: Option<String>,
    pub bake_texture: Option<bool>,
    pub python: Option<String>,
    pub entrypoint: Option<PathBuf>,
    pub required_packages: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_default_is_cuda() {
        assert_eq!(Device::default(), Device::Cuda);
    }

    #[test]
    fn device_as_arg() {
        assert_eq!(Device::Cuda.as_arg(), "cuda");
        assert_eq!(Device::Cpu.as_arg(), "cpu");
    }

    #[test]
    fn device_from_str() {
        assert_eq!("cuda".parse::<Device>(), Ok(Device::Cuda));
        assert_eq!("CPU".parse::<Device>(), Ok(Device::Cpu));
        assert!("tpu".parse::<Device>().is_err());
    }

    #[test]
    fn device_display_round_trips() {
        assert_eq!(Device::Cuda.to_string().parse::<Device>(), Ok(Device::Cuda));
        assert_eq!(Device::Cpu.to_string().parse::<Device>(), Ok(Device::Cpu));
    }

    #[test]
    fn default_config_has_six_required_packages() {
        let config = PipelineConfig::default();
        assert_eq!(config.required_packages.len(), 6);
        assert!(config.required_packages.contains(&"torch".to_string()));
        assert!(config.required_packages.contains(&"trimesh".to_string()));
    }

    #[test]
    fn default_config_disables_texture_baking() {
        assert!(!PipelineConfig::default().bake_texture);
    }

    #[test]
    fn default_config_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.input_image, PathBuf::from("input/photo.png"));
    }

    #[test]
    fn config_file_parses_empty_yaml() {
        let file: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert!(file.device.is_none());
        assert!(file.input_image.is_none());
    }

    #[test]
    fn config_file_parses_partial_yaml() {
        let yaml = "device: cpu\noutput_dir: meshes\n";
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.device.as_deref(), Some("cpu"));
        assert_eq!(file.output_dir, Some(PathBuf::from("meshes")));
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let yaml = "gpu_count: 2\n";
        assert!(serde_yaml::from_str::<ConfigFile>(yaml).is_err());
    }
}
