use env_logger::Env;
use log::{debug, error, info};

use clap::Parser;

use crate::{
    model::Model,
    preset::Plugin,
    settings::{Cli, Command, APP_NAME, PERSIST_KEY},
    template::check_date_format,
    ui::WINDOW_SIZE,
};

mod commands;
mod form;
mod model;
mod notification;
mod preset;
mod settings;
mod template;
mod ui;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("egui_winit", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .init();

    debug!("Started with settings: {:?}", cli);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    check_date_format(&cli.date_format)?;

    match cli.command.clone() {
        Some(Command::Generate {
            preset_path,
            output_path,
        }) => {
            let text = commands::generate(&preset_path, output_path.as_deref(), &cli.date_format)?;
            if output_path.is_none() {
                print!("{}", text);
            }
            Ok(())
        }
        Some(Command::Validate { preset_path }) => commands::validate(&preset_path),
        Some(Command::NewPreset { output_path }) => commands::new_preset(&output_path),
        Some(Command::Editor { preset_path }) => run_editor(cli, preset_path),
        None => run_editor(cli, None),
    }
}

fn run_editor(cli: Cli, preset_path: Option<String>) -> anyhow::Result<()> {
    info!("Running editor; close the window to quit");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let restored = cc
                .storage
                .and_then(|storage| eframe::get_value::<Plugin>(storage, PERSIST_KEY));
            if restored.is_some() {
                info!("Restored form from the previous session");
            }
            Box::new(Model::new(cli, restored, preset_path.as_deref()))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to launch editor: {}", e))?;
    info!("Editor closed");
    Ok(())
}
