mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::LabelingApp;

#[derive(Debug, Parser)]
#[command(
    name = "labeler-gui",
    about = "Desktop GUI for rating entrepreneurial readiness scenarios"
)]
struct Args {
    /// Base URL of the scenario backend.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(args.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Entrepreneurial Readiness Labeler")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Entrepreneurial Readiness Labeler",
        options,
        Box::new(move |_cc| Ok(Box::new(LabelingApp::new(args.server_url, cmd_tx, ui_rx)))),
    )
}
