use std::sync::Arc;

use eframe::egui;

use crate::color::ColorMap;
use crate::controller::Controller;
use crate::data::model::Dataset;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExamDashboardApp {
    pub controller: Controller,
    colors: ColorMap,
    title: String,
}

impl ExamDashboardApp {
    pub fn new(dataset: Arc<Dataset>, title: impl Into<String>) -> Self {
        let colors = ColorMap::new(dataset.students());
        Self {
            controller: Controller::new(dataset),
            colors,
            title: title.into(),
        }
    }
}

impl eframe::App for ExamDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + subject dropdown ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.title, &mut self.controller);
        });

        // Apply whatever the dropdown queued this frame before drawing outputs.
        self.controller.process();

        let output = self.controller.output();
        let columns = self.controller.dataset().columns();

        // ---- Right side panel: mark list ----
        egui::SidePanel::right("mark_list")
            .default_width(ctx.screen_rect().width() * 0.35)
            .resizable(true)
            .show(ctx, |ui| {
                table::mark_list(ui, columns, &output.rows);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::score_chart(ui, &output.chart, &self.colors);
        });
    }
}
