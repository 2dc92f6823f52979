mod api;
mod app;
mod color;
mod config;
mod controller;
mod format;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::EquipmentApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    let api_config = config.api_config();
    let api_url = api_config.base_url.clone();
    let client = api::ApiClient::new(api_config).context("creating HTTP client")?;
    log::info!(
        "Using equipment API at {} (timeout: {:?})",
        client.config().base_url,
        client.config().timeout
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Chemical Equipment Visualizer",
        options,
        Box::new(move |cc| Ok(Box::new(EquipmentApp::new(cc, client, api_url)))),
    )
    .map_err(|e| anyhow!("running the UI: {e}"))
}
