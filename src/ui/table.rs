use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::WideTable;

/// Raw view of a wide table, cells exactly as loaded.
pub fn raw_table(ui: &mut Ui, table: &WideTable) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(60.0), table.value_columns.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(&table.id_column);
            });
            for name in &table.value_columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut tr| {
                    tr.col(|ui| {
                        ui.label(&row.id);
                    });
                    for cell in &row.cells {
                        tr.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}
