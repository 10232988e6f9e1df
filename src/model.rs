use std::{fs, path::Path};

use chrono::Local;
use egui::DroppedFile;
use log::{debug, error, info, warn};

use crate::{
    form::PluginForm,
    notification::Notifications,
    preset::{error::PresetError, Plugin},
    settings::{Cli, PERSIST_KEY},
    template::format_date,
    ui::render_gui,
};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON. Make sure that the preset in your clipboard is valid. Note that you can not upload a *.jsfx plugin - it needs to be the preset";

/// Which form field the helper line is currently describing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Helper {
    PluginName,
    UseChannels,
    Name,
    Cc,
    DefaultValue,
    MinValue,
    MaxValue,
    Type,
}

impl Helper {
    pub fn text(&self) -> &'static str {
        match self {
            Helper::PluginName => "The name of the Plugin (default: My Plugin)",
            Helper::UseChannels => "Add a MIDI Channel selector (slider0) to the plugin; otherwise everything is sent on channel 1",
            Helper::Name => "The name of the slider (default: Slider + index)",
            Helper::Cc => "The CC value that will be used to send the MIDI data",
            Helper::DefaultValue => "The default value when resetting the MIDI controller",
            Helper::MinValue => "The min value of the MIDI controller",
            Helper::MaxValue => "The max value of the MIDI controller. Set to 1 and it will operate as a boolean switch true/false",
            Helper::Type => "Range sliders use min/max; Toggle sliders are a plain Off/On switch",
        }
    }
}

pub struct Model {
    pub form: PluginForm,
    pub notifications: Notifications,
    pub settings: Cli,
    /// Shown this frame
    pub helper: Option<Helper>,
    /// Collected while drawing this frame, shown on the next
    pub pending_helper: Option<Helper>,
    pub show_paste_dialog: bool,
    pub paste_buffer: String,
    pub show_confirm_clear: bool,
    pub current_preset_path: Option<String>,
}

impl eframe::App for Model {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        render_gui(self, ctx, frame);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        debug!("Persisting form state under \"{}\"", PERSIST_KEY);
        eframe::set_value(storage, PERSIST_KEY, self.form.plugin());
    }
}

impl Model {
    /// `restored` is the form from the previous session, if any; an explicit
    /// preset path takes precedence over it.
    pub fn new(settings: Cli, restored: Option<Plugin>, preset_path: Option<&str>) -> Model {
        let mut current_preset_path = None;
        let mut notifications = Notifications::new();

        let plugin = match preset_path {
            Some(path) => match Plugin::load(path) {
                Ok(p) => {
                    current_preset_path = Some(String::from(path));
                    Some(p)
                }
                Err(e) => {
                    error!("Failed to load preset from path \"{}\"; {:?}", path, e);
                    notifications.error("Preset not loaded", &format!("{:#}", e));
                    None
                }
            },
            None => None,
        }
        .or(restored)
        .unwrap_or_default();

        Model {
            form: PluginForm::new(plugin),
            notifications,
            settings,
            helper: None,
            pending_helper: None,
            show_paste_dialog: false,
            paste_buffer: String::new(),
            show_confirm_clear: false,
            current_preset_path,
        }
    }

    pub fn generation_date(&self) -> String {
        format_date(&Local::now(), &self.settings.date_format)
    }

    pub fn generated_code(&self) -> Result<String, PresetError> {
        self.form.generate(&self.generation_date())
    }

    /// Replace the form with preset text, reporting the outcome as a toast
    pub fn upload_preset(&mut self, text: &str) -> bool {
        match self.form.import_preset(text) {
            Ok(()) => {
                self.notifications.success("Preset was successfully uploaded");
                true
            }
            Err(PresetError::InvalidJson(e)) => {
                warn!("Rejected preset: {}", e);
                self.notifications.error("Error", INVALID_JSON_MESSAGE);
                false
            }
            Err(e) => {
                warn!("Rejected preset: {}", e);
                self.notifications.error("Invalid preset", &e.to_string());
                false
            }
        }
    }

    pub fn copy_plugin(&mut self, ctx: &egui::Context) {
        match self.generated_code() {
            Ok(code) => {
                ctx.output_mut(|o| o.copied_text = code);
                self.notifications.success("Copied to clipboard");
            }
            Err(e) => {
                self.notifications.error("Nothing to copy", &e.to_string());
            }
        }
    }

    pub fn copy_preset(&mut self, ctx: &egui::Context) {
        match self.form.export_preset() {
            Ok(json) => {
                ctx.output_mut(|o| o.copied_text = json);
                self.notifications.success("Preset copied to clipboard");
            }
            Err(e) => {
                error!("Failed to serialise preset: {:?}", e);
            }
        }
    }

    pub fn save_plugin_dialog(&mut self) {
        let code = match self.generated_code() {
            Ok(code) => code,
            Err(e) => {
                self.notifications.error("Cannot save plugin", &e.to_string());
                return;
            }
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSFX plugin", &["jsfx"])
            .set_file_name(format!("{}.jsfx", self.form.plugin().file_stem()))
            .save_file()
        {
            match fs::write(&path, code) {
                Ok(()) => {
                    info!("Saved plugin to \"{}\" OK", path.display());
                    self.notifications.info("Plugin saved");
                }
                Err(e) => {
                    self.notifications
                        .error("Error saving plugin", &format!("{}: {}", path.display(), e));
                }
            }
        }
    }

    pub fn save_preset_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Preset", &["json"])
            .set_file_name(format!("{}.json", self.form.plugin().file_stem()))
            .save_file()
        {
            let path = path.display().to_string();
            match Plugin::save(&path, self.form.plugin()) {
                Ok(()) => {
                    self.notifications.info("Preset saved");
                    self.current_preset_path = Some(path);
                }
                Err(e) => {
                    self.notifications
                        .error("Error saving preset", &format!("{:#}", e));
                }
            }
        }
    }

    pub fn load_preset_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Preset", &["json"])
            .pick_file()
        {
            self.load_preset_file(&path);
        }
    }

    fn load_preset_file(&mut self, path: &Path) {
        match fs::read_to_string(path) {
            Ok(text) => {
                if self.upload_preset(&text) {
                    self.current_preset_path = Some(path.display().to_string());
                }
            }
            Err(e) => {
                self.notifications
                    .error("Error reading preset", &format!("{}: {}", path.display(), e));
            }
        }
    }

    /// Files dropped onto the window are treated as presets
    pub fn handle_dropped_files(&mut self, files: Vec<DroppedFile>) {
        for file in files {
            if let Some(bytes) = &file.bytes {
                debug!("Dropped file \"{}\" ({} bytes)", file.name, bytes.len());
                let text = String::from_utf8_lossy(bytes);
                self.upload_preset(&text);
            } else if let Some(path) = &file.path {
                debug!("Dropped file at \"{}\"", path.display());
                self.load_preset_file(path);
            }
        }
    }

    pub fn submit_paste_dialog(&mut self) {
        let text = std::mem::take(&mut self.paste_buffer);
        if self.upload_preset(&text) {
            self.show_paste_dialog = false;
        } else {
            self.paste_buffer = text;
        }
    }

    pub fn clear(&mut self) {
        self.form.reset();
        self.current_preset_path = None;
        self.notifications.info("Form cleared");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::notification::ToastKind;

    fn model() -> Model {
        let settings = Cli::parse_from(["jsfx-plugin-generator", "--date-format", "%Y"]);
        Model::new(settings, None, None)
    }

    #[test]
    fn test_restored_form_is_used() {
        let settings = Cli::parse_from(["jsfx-plugin-generator"]);
        let restored = Plugin {
            name: String::from("Last session"),
            ..Plugin::default()
        };
        let model = Model::new(settings, Some(restored.clone()), None);
        assert_eq!(model.form.plugin(), &restored);
    }

    #[test]
    fn test_missing_preset_falls_back_to_restored() {
        let settings = Cli::parse_from(["jsfx-plugin-generator"]);
        let model = Model::new(settings, None, Some("/no/such/preset.json"));
        assert_eq!(model.form.plugin(), &Plugin::default());
        assert!(model.current_preset_path.is_none());

        let toast = model.notifications.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Preset not loaded");
        assert!(toast
            .message
            .as_deref()
            .is_some_and(|m| m.contains("/no/such/preset.json")));
    }

    #[test]
    fn test_malformed_upload_keeps_form_and_notifies() {
        let mut model = model();
        model.form.plugin_mut().name = String::from("Unchanged");
        let before = model.form.plugin().clone();

        assert!(!model.upload_preset("desc: My Plugin"));

        assert_eq!(model.form.plugin(), &before);
        let toast = model.notifications.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message.as_deref(), Some(INVALID_JSON_MESSAGE));
    }

    #[test]
    fn test_out_of_range_upload_reports_validation_error() {
        let mut model = model();
        let before = model.form.plugin().clone();

        assert!(!model.upload_preset(r#"{"sliders":[{"name":"a","cc":300}]}"#));

        assert_eq!(model.form.plugin(), &before);
        let toast = model.notifications.last().unwrap();
        assert_eq!(toast.title, "Invalid preset");
        assert_eq!(
            toast.message.as_deref(),
            Some("slider 1: cc must be between 0 and 127, got 300")
        );
    }

    #[test]
    fn test_successful_upload_notifies() {
        let mut model = model();
        assert!(model.upload_preset(r#"{"name":"Pads","useChannels":false,"sliders":[]}"#));
        assert_eq!(model.form.plugin().name, "Pads");
        assert_eq!(model.form.len(), 1);
        assert_eq!(
            model.notifications.last().map(|t| t.kind),
            Some(ToastKind::Success)
        );
    }

    #[test]
    fn test_paste_dialog_keeps_text_on_failure() {
        let mut model = model();
        model.show_paste_dialog = true;
        model.paste_buffer = String::from("{ nope");

        model.submit_paste_dialog();
        assert!(model.show_paste_dialog);
        assert_eq!(model.paste_buffer, "{ nope");

        model.paste_buffer = model.form.export_preset().unwrap();
        model.submit_paste_dialog();
        assert!(!model.show_paste_dialog);
        assert!(model.paste_buffer.is_empty());
    }

    #[test]
    fn test_dropped_bytes_are_imported() {
        let mut model = model();
        let file = DroppedFile {
            name: String::from("pads.json"),
            bytes: Some(br#"{"name":"Dropped"}"#.to_vec().into()),
            ..Default::default()
        };
        model.handle_dropped_files(vec![file]);
        assert_eq!(model.form.plugin().name, "Dropped");
    }

    #[test]
    fn test_generated_code_uses_date_format() {
        let model = model();
        let code = model.generated_code().unwrap();
        let year = Local::now().format("%Y").to_string();
        assert!(code.starts_with(&format!("// Automatically generated the {}\n", year)));
    }
}
