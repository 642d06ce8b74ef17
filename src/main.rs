use std::sync::Arc;

use anyhow::Context;
use eframe::egui;

use exam_dashboard::app::ExamDashboardApp;
use exam_dashboard::config::DashboardConfig;
use exam_dashboard::data::loader::load_file;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args_os().skip(1));

    // Fail before any window exists if the data cannot be used.
    let dataset = load_file(&config.data_path, &config.columns)
        .with_context(|| format!("loading {}", config.data_path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    let dataset = Arc::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window.inner_size)
            .with_min_inner_size(config.window.min_inner_size),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExamDashboardApp::new(dataset, title)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
