//! Configuration management

mod settings;

pub use settings::{AnalysisSettings, GeneralSettings, ModelSettings, Settings};
