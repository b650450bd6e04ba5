use std::path::{Path, PathBuf};

use pixelsmith_core::{ColorSpace, DitheringType, EditorConfig, ScalingConverter, ScalingType};
use serde::Deserialize;

use crate::error::AppError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "PIXELSMITH_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// How decoded images are interpreted
    pub editor: EditorSection,

    /// How converted images are rendered
    pub output: OutputSection,

    pub dithering: DitheringSection,

    pub scaling: ScalingSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EditorSection {
    /// Color space to switch to after opening
    pub color_space: ColorSpace,

    /// Gamma assumed for files without a gAMA chunk
    pub gamma: f32,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Rgb,
            gamma: default_gamma(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Gamma to render at; unset keeps the image's working gamma
    pub gamma: Option<f32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DitheringSection {
    pub algorithm: DitheringType,

    /// Bits per sample, 1..=8
    pub depth: u8,

    /// Fixed seed for random dithering
    pub seed: Option<u64>,
}

impl Default for DitheringSection {
    fn default() -> Self {
        Self {
            algorithm: DitheringType::None,
            depth: default_depth(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScalingSection {
    pub algorithm: ScalingType,

    /// B parameter of the cubic spline
    pub b: f32,

    /// C parameter of the cubic spline
    pub c: f32,
}

impl Default for ScalingSection {
    fn default() -> Self {
        Self {
            algorithm: ScalingType::Bilinear,
            b: default_spline_parameter(),
            c: default_spline_parameter(),
        }
    }
}

impl ScalingSection {
    pub fn converter(&self) -> ScalingConverter {
        ScalingConverter::new(self.b, self.c)
    }
}

fn default_gamma() -> f32 {
    1.0
}

fn default_depth() -> u8 {
    8
}

fn default_spline_parameter() -> f32 {
    0.5
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from `path`, or from the file named by
    /// `PIXELSMITH_CONFIG`, falling back to defaults when neither is set or
    /// the file cannot be used.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var(CONFIG_ENV) {
                Ok(path) => PathBuf::from(path),
                Err(_) => {
                    tracing::debug!("No config file given, using defaults");
                    return Self::default();
                }
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Editor state for an image whose file declared `file_gamma`.
    pub fn editor_config(&self, file_gamma: Option<f32>) -> EditorConfig {
        EditorConfig {
            color_space: ColorSpace::Rgb,
            gamma: file_gamma.unwrap_or(self.editor.gamma),
        }
    }
}
