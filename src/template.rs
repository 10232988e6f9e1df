use chrono::{
    format::{Item, StrftimeItems},
    DateTime, TimeZone,
};
use indexmap::IndexMap;
use log::debug;

use crate::preset::{error::PresetError, Plugin};

/// Same shape as the `en-GB` medium date + time style, e.g. "15 Oct 2026, 10:20:33"
pub const DEFAULT_DATE_FORMAT: &str = "%-d %b %Y, %H:%M:%S";

pub const PLUGIN_TEMPLATE: &str = "// Automatically generated the %DATE%
// @version 1.1.0

desc: %PLUGIN_NAME%

%CHANNEL_SLIDER%cc_msg = 0xB0; // 0xB0 or CC messages

%SLIDERS%
%BLOCKS%";

pub const CHANNEL_SLIDER: &str =
    "slider0:0<0,15,1{1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16}>MIDI Channel\n\n";

pub const BLOCK_TEMPLATE: &str = "@init
c%SLIDER_INDEX% = ceil(slider%SLIDER_INDEX%);
c%SLIDER_INDEX%_run = 0;

@slider
c%SLIDER_INDEX% != slider%SLIDER_INDEX% ? (
  c%SLIDER_INDEX% = slider%SLIDER_INDEX%;
  c%SLIDER_INDEX%_run = 1;
);

@block
c%SLIDER_INDEX%_run ? (
  midisend(offset, (%STATUS_BYTE%), (%SLIDER_CC%) | (c%SLIDER_INDEX% * 256));
  c%SLIDER_INDEX%_run = 0;
);";

/// Replace every `%KEY%` token found in `values`, in a single pass.
///
/// Substituted text is never scanned again, and tokens with no entry in
/// `values` are copied through unchanged.
pub fn substitute(template: &str, values: &IndexMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('%').and_then(|end| {
            let key = &after[..end];
            values.get(key).map(|value| (value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Render the JSFX source for a plugin. Invalid plugins are refused.
pub fn render(plugin: &Plugin, date: &str) -> Result<String, PresetError> {
    let errors = plugin.validate();
    if !errors.is_empty() {
        return Err(PresetError::Invalid(errors));
    }

    let status_byte = if plugin.use_channels {
        "cc_msg + slider0"
    } else {
        "cc_msg"
    };

    let mut declarations = String::new();
    let mut blocks = String::new();

    for (i, slider) in plugin.sliders.iter().enumerate() {
        let index = i + 1;

        declarations.push_str(&slider.declaration(index));
        declarations.push('\n');

        let block_values = IndexMap::from([
            ("SLIDER_INDEX", index.to_string()),
            ("SLIDER_CC", slider.effective_cc().to_string()),
            ("STATUS_BYTE", String::from(status_byte)),
        ]);
        blocks.push_str(&substitute(BLOCK_TEMPLATE, &block_values));
        blocks.push('\n');
    }

    let values = IndexMap::from([
        ("DATE", String::from(date)),
        ("PLUGIN_NAME", String::from(plugin.display_name())),
        (
            "CHANNEL_SLIDER",
            String::from(if plugin.use_channels {
                CHANNEL_SLIDER
            } else {
                ""
            }),
        ),
        ("SLIDERS", declarations),
        ("BLOCKS", blocks),
    ]);

    debug!(
        "Rendering plugin \"{}\" with {} sliders",
        plugin.display_name(),
        plugin.sliders.len()
    );

    Ok(substitute(PLUGIN_TEMPLATE, &values))
}

/// Check a strftime pattern up front; chrono panics when formatting a bad one
pub fn check_date_format(format: &str) -> anyhow::Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        Err(anyhow::anyhow!("invalid date format \"{}\"", format))
    } else {
        Ok(())
    }
}

pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::preset::slider::{Slider, SliderType};

    const DATE: &str = "15 Oct 2026, 10:20:33";

    fn plugin_with(n: usize) -> Plugin {
        let mut plugin = Plugin::default();
        plugin.sliders = (1..=n)
            .map(|i| {
                let mut s = Slider::numbered(i);
                s.cc = Some(20 + i as i64);
                s
            })
            .collect();
        plugin
    }

    #[test]
    fn test_single_slider_output() {
        let mut plugin = Plugin::default();
        plugin.sliders[0].cc = Some(74);

        let expected = "// Automatically generated the 15 Oct 2026, 10:20:33
// @version 1.1.0

desc: My Plugin

slider0:0<0,15,1{1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16}>MIDI Channel

cc_msg = 0xB0; // 0xB0 or CC messages

slider1:64<0,127,1>Slider1 (74)

@init
c1 = ceil(slider1);
c1_run = 0;

@slider
c1 != slider1 ? (
  c1 = slider1;
  c1_run = 1;
);

@block
c1_run ? (
  midisend(offset, (cc_msg + slider0), (74) | (c1 * 256));
  c1_run = 0;
);
";
        assert_eq!(render(&plugin, DATE).unwrap(), expected);
    }

    #[test]
    fn test_one_declaration_and_block_per_slider_in_order() {
        let plugin = plugin_with(4);
        let output = render(&plugin, DATE).unwrap();

        let declared: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("slider") && !l.starts_with("slider0:"))
            .collect();
        assert_eq!(declared.len(), 4);
        for (i, line) in declared.iter().enumerate() {
            assert!(line.starts_with(&format!("slider{}:", i + 1)));
        }

        assert_eq!(output.matches("@block").count(), 4);
        let sends: Vec<&str> = output
            .lines()
            .filter(|l| l.trim_start().starts_with("midisend"))
            .collect();
        for (i, line) in sends.iter().enumerate() {
            let index = i + 1;
            assert!(line.contains(&format!("({}) | (c{} * 256)", 20 + index, index)));
        }
    }

    #[test]
    fn test_without_channels() {
        let mut plugin = plugin_with(1);
        plugin.use_channels = false;
        let output = render(&plugin, DATE).unwrap();

        assert!(!output.contains("slider0"));
        assert!(output.contains("desc: My Plugin\n\ncc_msg = 0xB0;"));
        assert!(output.contains("midisend(offset, (cc_msg), (21) | (c1 * 256));"));
    }

    #[test]
    fn test_toggle_declaration() {
        let mut plugin = plugin_with(1);
        plugin.sliders[0].slider_type = SliderType::Toggle;
        plugin.sliders[0].default_value = 1;
        let output = render(&plugin, DATE).unwrap();
        assert!(output.contains("slider1:1<0,1,1{Off,On}>Slider1 (21)\n"));
    }

    #[test]
    fn test_invalid_values_never_rendered() {
        let mut plugin = plugin_with(2);
        plugin.sliders[1].cc = Some(200);
        let result = render(&plugin, DATE);
        assert!(matches!(result, Err(PresetError::Invalid(_))));
    }

    #[test]
    fn test_names_are_not_rescanned() {
        let mut plugin = plugin_with(1);
        plugin.name = String::from("%DATE% %SLIDERS%");
        let output = render(&plugin, DATE).unwrap();
        assert!(output.contains("desc: %DATE% %SLIDERS%\n"));
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        let values = IndexMap::from([("A", String::from("1"))]);
        assert_eq!(substitute("%A% 50% %B% %A", &values), "1 50% %B% %A");
        assert_eq!(substitute("%%A%%", &values), "%1%");
    }

    #[test]
    fn test_default_date_format() {
        let now = Utc.with_ymd_and_hms(2026, 10, 5, 9, 7, 3).unwrap();
        assert_eq!(format_date(&now, DEFAULT_DATE_FORMAT), "5 Oct 2026, 09:07:03");
    }

    #[test]
    fn test_check_date_format() {
        assert!(check_date_format(DEFAULT_DATE_FORMAT).is_ok());
        assert!(check_date_format("%Y-%m-%d").is_ok());
        assert!(check_date_format("%Y %").is_err());
    }
}
