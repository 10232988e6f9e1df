use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Upper bound for every MIDI data value a slider carries. Values are kept
/// as `i64` so out-of-range preset numbers reach validation instead of
/// failing to parse.
pub const MIDI_MAX: i64 = 127;

/// Controller number written into generated code when a slider has none
pub const FALLBACK_CC: i64 = 1;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SliderType {
    #[default]
    Range,
    /// An on/off switch; declared with a 0..1 range regardless of min/max
    Toggle,
}

impl SliderType {
    pub fn label(&self) -> &'static str {
        match self {
            SliderType::Range => "Range",
            SliderType::Toggle => "Toggle",
        }
    }
}

fn default_value() -> i64 {
    64
}

fn default_max() -> i64 {
    MIDI_MAX
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// A single MIDI CC control, as it appears in a preset
pub struct Slider {
    pub name: String,
    #[serde(default = "default_value")]
    pub default_value: i64,
    #[serde(default)]
    pub min_value: i64,
    #[serde(default = "default_max")]
    pub max_value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<i64>,
    #[serde(default, rename = "type")]
    pub slider_type: SliderType,
}

impl Slider {
    pub fn new(name: &str) -> Self {
        Slider {
            name: String::from(name),
            default_value: default_value(),
            min_value: 0,
            max_value: default_max(),
            cc: None,
            slider_type: SliderType::Range,
        }
    }

    /// The default slider for a 1-based position, e.g. "Slider3"
    pub fn numbered(n: usize) -> Self {
        Slider::new(&format!("Slider{}", n))
    }

    pub fn effective_cc(&self) -> i64 {
        self.cc.unwrap_or(FALLBACK_CC)
    }

    /// Blank names fall back to "Slider" + the 1-based index
    pub fn display_name(&self, index: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Slider{}", index)
        } else {
            String::from(trimmed)
        }
    }

    /// Check field bounds and consistency; `index` is 1-based and only used
    /// to tag the errors.
    pub fn validate(&self, index: usize) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let fields = [
            ("defaultValue", Some(self.default_value)),
            ("minValue", Some(self.min_value)),
            ("maxValue", Some(self.max_value)),
            ("cc", self.cc),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if !(0..=MIDI_MAX).contains(&value) {
                    errors.push(ValidationError::OutOfRange {
                        slider: index,
                        field,
                        value,
                    });
                }
            }
        }

        if self.name.contains(['\n', '\r']) {
            errors.push(ValidationError::LineBreakInName { slider: index });
        }

        match self.slider_type {
            SliderType::Range => {
                if self.min_value > self.max_value {
                    errors.push(ValidationError::InvertedRange {
                        slider: index,
                        min: self.min_value,
                        max: self.max_value,
                    });
                } else if self.default_value < self.min_value
                    || self.default_value > self.max_value
                {
                    errors.push(ValidationError::DefaultOutsideRange {
                        slider: index,
                        value: self.default_value,
                        min: self.min_value,
                        max: self.max_value,
                    });
                }
            }
            SliderType::Toggle => {
                if !(0..=1).contains(&self.default_value) {
                    errors.push(ValidationError::ToggleDefault {
                        slider: index,
                        value: self.default_value,
                    });
                }
            }
        }

        errors
    }

    /// The `sliderN:` declaration line, without trailing newline
    pub fn declaration(&self, index: usize) -> String {
        let name = self.display_name(index);
        match self.slider_type {
            SliderType::Range => format!(
                "slider{}:{}<{},{},1>{} ({})",
                index,
                self.default_value,
                self.min_value,
                self.max_value,
                name,
                self.effective_cc()
            ),
            SliderType::Toggle => format!(
                "slider{}:{}<0,1,1{{Off,On}}>{} ({})",
                index,
                self.default_value,
                name,
                self.effective_cc()
            ),
        }
    }
}

impl Default for Slider {
    fn default() -> Self {
        Slider::numbered(1)
    }
}
