use log::{debug, info};

use crate::{
    preset::{
        error::{PresetError, ValidationError},
        slider::Slider,
        Plugin,
    },
    template,
};

/// The plugin currently being edited, plus the list operations the editor offers
pub struct PluginForm {
    plugin: Plugin,
}

impl PluginForm {
    pub fn new(plugin: Plugin) -> Self {
        let mut form = PluginForm { plugin };
        form.plugin.ensure_sliders();
        form
    }

    pub fn plugin(&self) -> &Plugin {
        &self.plugin
    }

    /// Direct field access for the editor widgets. List structure changes
    /// should go through the methods below so the form never ends up empty.
    pub fn plugin_mut(&mut self) -> &mut Plugin {
        &mut self.plugin
    }

    pub fn len(&self) -> usize {
        self.plugin.sliders.len()
    }

    /// Insert a new default slider right after `index`, named after the new count
    pub fn add_slider_after(&mut self, index: usize) {
        let position = (index + 1).min(self.plugin.sliders.len());
        let slider = Slider::numbered(self.plugin.sliders.len() + 1);
        debug!("Insert slider \"{}\" at {}", slider.name, position);
        self.plugin.sliders.insert(position, slider);
    }

    pub fn remove_slider(&mut self, index: usize) {
        if index < self.plugin.sliders.len() {
            let removed = self.plugin.sliders.remove(index);
            debug!("Removed slider \"{}\"", removed.name);
        }
        self.plugin.ensure_sliders();
    }

    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.plugin.sliders.len() {
            self.plugin.sliders.swap(index, index - 1);
        }
    }

    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.plugin.sliders.len() {
            self.plugin.sliders.swap(index, index + 1);
        }
    }

    /// Forget the slider's controller number; generated code falls back to CC 1
    pub fn clear_cc(&mut self, index: usize) {
        if let Some(slider) = self.plugin.sliders.get_mut(index) {
            slider.cc = None;
        }
    }

    pub fn reset(&mut self) {
        info!("Resetting form to defaults");
        self.plugin = Plugin::default();
    }

    /// Replace the form state with a preset. The text is parsed and validated
    /// first; on any error the current state is left as it was.
    pub fn import_preset(&mut self, text: &str) -> Result<(), PresetError> {
        let plugin = Plugin::from_json_validated(text)?;
        info!(
            "Imported preset \"{}\" with {} sliders",
            plugin.name,
            plugin.sliders.len()
        );
        self.plugin = plugin;
        Ok(())
    }

    pub fn export_preset(&self) -> Result<String, serde_json::Error> {
        self.plugin.to_json()
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.plugin.validate()
    }

    pub fn generate(&self, date: &str) -> Result<String, PresetError> {
        template::render(&self.plugin, date)
    }
}

impl Default for PluginForm {
    fn default() -> Self {
        PluginForm::new(Plugin::default())
    }
}
