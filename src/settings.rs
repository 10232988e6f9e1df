use clap::{Parser, Subcommand};

use crate::template::DEFAULT_DATE_FORMAT;

/// eframe storage key for the editor's form state
pub const PERSIST_KEY: &str = "form.jsfx-plugin";

pub const APP_NAME: &str = "JSFX Plugin Generator";

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = "REAPER JSFX MIDI CC plugin generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long = "loglevel", global = true, default_value_t=String::from("info"))]
    pub log_level: String,

    /// strftime pattern for the "Automatically generated" date line
    #[arg(long = "date-format", env = "JSFX_DATE_FORMAT", global = true, default_value_t=String::from(DEFAULT_DATE_FORMAT))]
    pub date_format: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the editor window (the default when no command is given)
    Editor {
        /// Preset to open instead of the last session's form
        #[arg(long = "preset")]
        preset_path: Option<String>,
    },
    /// Render a preset into a .jsfx plugin
    Generate {
        #[arg(long = "preset")]
        preset_path: String,

        /// Where to write the plugin; prints to stdout if omitted
        #[arg(long = "output")]
        output_path: Option<String>,
    },
    /// Check a preset and list every validation error
    Validate {
        #[arg(long = "preset")]
        preset_path: String,
    },
    /// Write the default preset, as a starting point for editing by hand
    NewPreset {
        #[arg(long = "output")]
        output_path: String,
    },
}
