mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::try_from(Cli::parse())?;

    // No window without data: a load failure ends the process here.
    let (ireland, world) =
        match data::loader::load_datasets(&config.ireland_path, &config.world_path) {
            Ok(datasets) => datasets,
            Err(e) => {
                log::error!("Failed to load datasets: {e}");
                return Err(e).context("loading dashboard data");
            }
        };

    let state = AppState::new(config, ireland, world);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Import/Export Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
