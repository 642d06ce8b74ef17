use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::controller::Controller;

// ---------------------------------------------------------------------------
// Top bar – title and subject selector
// ---------------------------------------------------------------------------

/// Render the title row and the subject dropdown.
pub fn top_bar(ui: &mut Ui, title: &str, controller: &mut Controller) {
    ui.add_space(6.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(title).strong().size(26.0));
    });
    ui.add_space(6.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Select Subject:").strong().size(18.0));
        subject_dropdown(ui, controller);

        ui.separator();

        let dataset = controller.dataset();
        ui.label(format!(
            "{} exam rows loaded, {} visible",
            dataset.len(),
            controller.output().rows.len()
        ));

        if dataset.skipped_rows() > 0 {
            ui.label(
                RichText::new(format!("{} malformed rows skipped", dataset.skipped_rows()))
                    .color(Color32::YELLOW),
            );
        }
    });
    ui.add_space(6.0);
}

/// Single-selection, non-clearable dropdown over the subject catalog.
/// A click only queues the selection; the controller applies it.
fn subject_dropdown(ui: &mut Ui, controller: &mut Controller) {
    let dataset = Arc::clone(controller.dataset());
    let current = controller.selection().to_string();

    egui::ComboBox::from_id_salt("subject_dropdown")
        .selected_text(&current)
        .width(300.0)
        .show_ui(ui, |ui: &mut Ui| {
            for subject in dataset.subjects() {
                if ui
                    .selectable_label(current == *subject, subject)
                    .clicked()
                {
                    controller.request(subject.clone());
                }
            }
        });
}
