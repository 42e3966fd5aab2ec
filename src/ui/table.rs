use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::data::filter::ScatterSeries;
use crate::data::model::LaunchTable;

// ---------------------------------------------------------------------------
// Records table – the launches currently plotted in the scatter
// ---------------------------------------------------------------------------

pub fn records_table(ui: &mut Ui, dataset: &LaunchTable, series: &ScatterSeries) {
    if series.is_empty() {
        ui.label("No launches in the selected payload range.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .max_scroll_height(240.0)
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Outcome", "Booster"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, series.points.len(), |mut row| {
                let point = series.points[row.index()];
                let Some(record) = dataset.records().get(point.row) else {
                    return;
                };

                row.col(|ui| {
                    ui.label(record.flight_number.map_or_else(|| "–".to_string(), |n| n.to_string()));
                });
                row.col(|ui| {
                    ui.label(&record.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", point.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(point.outcome.label()).color(outcome_color(point.outcome)),
                    );
                });
                row.col(|ui| {
                    ui.label(record.booster_version_category.as_deref().unwrap_or("–"));
                });
            });
        });
}
