mod app;
mod color;
mod config;
mod data;
mod dispatch;
mod state;
mod ui;

use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use config::Args;
use dispatch::dashboard_dispatcher;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::new(dashboard_dispatcher()?, args.payload_step);
    state.load_path(&args.dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
