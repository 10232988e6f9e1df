use std::fs;

use anyhow::{anyhow, Context};
use chrono::Local;
use log::{error, info};

use crate::{
    preset::{error::PresetError, Plugin},
    template::{self, format_date},
};

/// Render a preset file; returns the plugin text, also writing it out when
/// `output_path` is given.
pub fn generate(
    preset_path: &str,
    output_path: Option<&str>,
    date_format: &str,
) -> anyhow::Result<String> {
    let plugin = Plugin::load(preset_path)?;
    let date = format_date(&Local::now(), date_format);
    let text = template::render(&plugin, &date)?;

    if let Some(path) = output_path {
        fs::write(path, &text).with_context(|| format!("failed to write \"{}\"", path))?;
        info!(
            "Wrote plugin \"{}\" ({} sliders) to \"{}\"",
            plugin.display_name(),
            plugin.sliders.len(),
            path
        );
    }

    Ok(text)
}

/// Check a preset file, logging every problem found
pub fn validate(preset_path: &str) -> anyhow::Result<()> {
    let text = fs::read_to_string(preset_path)
        .with_context(|| format!("failed to read \"{}\"", preset_path))?;

    match Plugin::from_json_validated(&text) {
        Ok(plugin) => {
            info!(
                "Preset \"{}\" is valid ({} sliders)",
                plugin.display_name(),
                plugin.sliders.len()
            );
            Ok(())
        }
        Err(e @ PresetError::InvalidJson(_)) => Err(e.into()),
        Err(e) => {
            for problem in e.validation_errors() {
                error!("{}", problem);
            }
            Err(anyhow!(
                "preset \"{}\" has {} validation error(s)",
                preset_path,
                e.validation_errors().len()
            ))
        }
    }
}

pub fn new_preset(output_path: &str) -> anyhow::Result<()> {
    Plugin::save(output_path, &Plugin::default())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "jsfx-plugin-generator-{}-{}",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn test_new_preset_then_generate() {
        let preset = temp_path("new.json");
        let output = temp_path("new.jsfx");
        let preset_str = preset.display().to_string();
        let output_str = output.display().to_string();

        new_preset(&preset_str).unwrap();
        validate(&preset_str).unwrap();
        let text = generate(&preset_str, Some(&output_str), "%Y").unwrap();
        let written = fs::read_to_string(&output).unwrap();

        let _ = fs::remove_file(&preset);
        let _ = fs::remove_file(&output);

        assert_eq!(text, written);
        assert!(text.contains("desc: My Plugin\n"));
        assert!(text.contains("slider1:64<0,127,1>Slider1 (1)\n"));
    }

    #[test]
    fn test_validate_reports_invalid_preset() {
        let preset = temp_path("invalid.json");
        fs::write(&preset, r#"{"sliders":[{"name":"a","minValue":90,"maxValue":10}]}"#)
            .unwrap();

        let result = validate(&preset.display().to_string());
        let _ = fs::remove_file(&preset);

        assert!(result.is_err());
    }

    #[test]
    fn test_generate_rejects_plugin_script() {
        let preset = temp_path("not-a-preset.jsfx");
        fs::write(&preset, "desc: My Plugin\n").unwrap();

        let result = generate(&preset.display().to_string(), None, "%Y");
        let _ = fs::remove_file(&preset);

        assert!(result.is_err());
    }
}
