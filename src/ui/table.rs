use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::view::Row;

// ---------------------------------------------------------------------------
// Mark list (right side panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered rows under the source header.
pub fn mark_list(ui: &mut Ui, columns: &[String], rows: &[Row]) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Selected Exam Mark List");
    });
    ui.separator();

    if rows.is_empty() {
        ui.label("No rows for this subject.");
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .auto_shrink([false, false])
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
