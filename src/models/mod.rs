pub mod config;

pub use config::{AppConfig, DitheringSection, EditorSection, OutputSection, ScalingSection};
