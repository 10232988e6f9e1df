use thiserror::Error;

use super::slider::MIDI_MAX;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("slider {slider}: {field} must be between 0 and {}, got {value}", MIDI_MAX)]
    OutOfRange {
        slider: usize,
        field: &'static str,
        value: i64,
    },
    #[error("slider {slider}: minValue ({min}) is greater than maxValue ({max})")]
    InvertedRange { slider: usize, min: i64, max: i64 },
    #[error("slider {slider}: defaultValue ({value}) is outside {min}..{max}")]
    DefaultOutsideRange {
        slider: usize,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("slider {slider}: a toggle's defaultValue must be 0 or 1, got {value}")]
    ToggleDefault { slider: usize, value: i64 },
    #[error("slider {slider}: name must be a single line")]
    LineBreakInName { slider: usize },
    #[error("plugin name must be a single line")]
    LineBreakInPluginName,
}

impl ValidationError {
    /// The 1-based slider the error belongs to; `None` for plugin-level errors
    pub fn slider(&self) -> Option<usize> {
        match self {
            ValidationError::OutOfRange { slider, .. }
            | ValidationError::InvertedRange { slider, .. }
            | ValidationError::DefaultOutsideRange { slider, .. }
            | ValidationError::ToggleDefault { slider, .. }
            | ValidationError::LineBreakInName { slider } => Some(*slider),
            ValidationError::LineBreakInPluginName => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("invalid preset JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{}", summarise(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarise(errors: &[ValidationError]) -> String {
    match errors {
        [] => String::from("preset is invalid"),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

impl PresetError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            PresetError::InvalidJson(_) => &[],
            PresetError::Invalid(errors) => errors,
        }
    }
}
