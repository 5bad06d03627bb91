//! GUI entry point for Flotten-Rechner

mod analysis_panel;
mod app;
mod route_panel;
mod settings_panel;
mod vehicle_panel;

use app::FlottenApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flotten-Rechner",
        options,
        Box::new(|cc| Ok(Box::new(FlottenApp::new(cc)))),
    )
}
