use std::fs;

use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use self::error::{PresetError, ValidationError};
use self::slider::Slider;

pub mod error;
pub mod slider;

pub const DEFAULT_PLUGIN_NAME: &str = "My Plugin";

fn default_name() -> String {
    String::from(DEFAULT_PLUGIN_NAME)
}

fn default_use_channels() -> bool {
    true
}

fn default_sliders() -> Vec<Slider> {
    vec![Slider::numbered(1)]
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// The full form state of one generated plugin. Saved to disk this is a "preset".
pub struct Plugin {
    #[serde(default = "default_name")]
    pub name: String,
    /// Expose a MIDI channel selector (slider0) in the generated plugin
    #[serde(default = "default_use_channels")]
    pub use_channels: bool,
    #[serde(default = "default_sliders")]
    pub sliders: Vec<Slider>,
}

impl Default for Plugin {
    fn default() -> Self {
        Plugin {
            name: default_name(),
            use_channels: default_use_channels(),
            sliders: default_sliders(),
        }
    }
}

impl Plugin {
    /// Parse preset text. Parsing only; call [`Plugin::validate`] before use.
    pub fn from_json(text: &str) -> Result<Plugin, PresetError> {
        let mut plugin = serde_json::from_str::<Plugin>(text)?;
        plugin.ensure_sliders();
        debug!(
            "Parsed preset \"{}\" with {} sliders",
            plugin.name,
            plugin.sliders.len()
        );
        Ok(plugin)
    }

    /// Parse and validate in one step
    pub fn from_json_validated(text: &str) -> Result<Plugin, PresetError> {
        let plugin = Plugin::from_json(text)?;
        let errors = plugin.validate();
        if errors.is_empty() {
            Ok(plugin)
        } else {
            Err(PresetError::Invalid(errors))
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// A plugin always has at least one slider
    pub fn ensure_sliders(&mut self) -> bool {
        if self.sliders.is_empty() {
            debug!("No sliders left; restoring a default one");
            self.sliders.push(Slider::numbered(1));
            true
        } else {
            false
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.contains(['\n', '\r']) {
            errors.push(ValidationError::LineBreakInPluginName);
        }
        for (i, slider) in self.sliders.iter().enumerate() {
            errors.extend(slider.validate(i + 1));
        }
        errors
    }

    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_PLUGIN_NAME
        } else {
            trimmed
        }
    }

    /// The plugin name made safe for use as a file name, without extension
    pub fn file_stem(&self) -> String {
        self.display_name()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }

    pub fn load(path: &str) -> anyhow::Result<Plugin> {
        let text = fs::read_to_string(path);
        match text {
            Ok(d) => {
                info!("Found preset {}; parsing...", &path);
                let plugin = Plugin::from_json_validated(&d)
                    .with_context(|| format!("failed to parse preset file \"{}\"", path))?;
                info!(
                    "... loaded preset \"{}\" with {} sliders OK",
                    plugin.name,
                    plugin.sliders.len()
                );
                Ok(plugin)
            }
            Err(e) => {
                warn!("Failed to load preset from disk: {:?}", e);
                Err(anyhow::Error::new(e).context(format!("failed to read \"{}\"", path)))
            }
        }
    }

    pub fn save(path: &str, plugin: &Plugin) -> anyhow::Result<()> {
        let json = plugin.to_json()?;
        debug!("{}", json);

        fs::write(path, json).with_context(|| format!("failed to write \"{}\"", path))?;

        info!("Saved preset JSON to \"{}\" OK", &path);

        Ok(())
    }
}
