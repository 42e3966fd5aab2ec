use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::{ColorMap, outcome_color};
use crate::data::aggregate::PieSeries;
use crate::data::filter::ScatterSeries;
use crate::data::model::Outcome;
use crate::state::AppState;
use crate::ui::table;

const PIE_HEIGHT: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Central panel: both charts plus the records table
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a launch records file to begin  (File → Open…)");
            });
            return;
        }
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(RichText::new("SpaceX Launch Records Dashboard").size(28.0));
            });
            ui.add_space(8.0);

            if dataset.is_empty() {
                ui.label("The loaded file contains no launch records.");
                return;
            }

            if let Some(pie) = &state.pie {
                pie_chart(ui, pie, state.color_map.as_ref());
            }

            ui.separator();

            if let Some(series) = &state.scatter {
                scatter_plot(ui, series);

                egui::CollapsingHeader::new(format!("Launches in view ({})", series.points.len()))
                    .id_salt("records_table")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        table::records_table(ui, dataset, series);
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the success pie with percentage labels and a legend.
pub fn pie_chart(ui: &mut Ui, pie: &PieSeries, colors: Option<&ColorMap>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&pie.title);
    });

    if pie.is_empty() {
        ui.label("No launches match the current selection.");
        return;
    }

    let total = pie.total() as f32;
    let color_of = |label: &str| colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(label));

    ui.horizontal(|ui: &mut Ui| {
        let diameter = PIE_HEIGHT.min(ui.available_width() * 0.6);
        let (response, painter) = ui.allocate_painter(Vec2::splat(diameter), Sense::hover());
        let center = response.rect.center();
        let radius = diameter * 0.45;

        let mut start = -FRAC_PI_2;
        let mut hovered: Option<String> = None;
        let pointer_angle = response.hover_pos().and_then(|pos| {
            let d = pos - center;
            (d.length() <= radius).then(|| (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU))
        });

        for slice in &pie.slices {
            let share = slice.count as f32 / total;
            let sweep = share * TAU;
            paint_slice(&painter, center, radius, start, sweep, color_of(&slice.label));

            if share >= 0.04 {
                let label_pos = center + Vec2::angled(start + sweep / 2.0) * radius * 0.65;
                painter.text(
                    label_pos,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", share * 100.0),
                    FontId::proportional(13.0),
                    Color32::WHITE,
                );
            }

            let offset = start + FRAC_PI_2;
            if pointer_angle.is_some_and(|a| a >= offset && a < offset + sweep) {
                hovered = Some(format!("{}: {} ({:.1}%)", slice.label, slice.count, share * 100.0));
            }
            start += sweep;
        }

        if let Some(text) = hovered {
            response.on_hover_text_at_pointer(text);
        }

        ui.add_space(16.0);
        ui.vertical(|ui: &mut Ui| {
            for slice in &pie.slices {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color_of(&slice.label)));
                    ui.label(format!("{}  {}", slice.label, slice.count));
                });
            }
        });
    });
}

/// Fill one wedge. Split into pieces of at most a quarter turn so each
/// polygon stays convex.
fn paint_slice(painter: &Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    const ARC_STEPS: usize = 16;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;

    for p in 0..pieces {
        let a0 = start + sweep * p as f32 / pieces as f32;
        let a1 = start + sweep * (p + 1) as f32 / pieces as f32;
        let mut points = Vec::with_capacity(ARC_STEPS + 2);
        points.push(center);
        for s in 0..=ARC_STEPS {
            let a = a0 + (a1 - a0) * s as f32 / ARC_STEPS as f32;
            points.push(center + Vec2::angled(a) * radius);
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    painter.line_segment(
        [center, center + Vec2::angled(start) * radius],
        Stroke::new(1.5, Color32::WHITE),
    );
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Payload mass on x, outcome class (0/1) on y, coloured by outcome.
pub fn scatter_plot(ui: &mut Ui, series: &ScatterSeries) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&series.title);
    });

    Plot::new("success_payload_scatter")
        .legend(Legend::default())
        .height(SCATTER_HEIGHT)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Success")
        .include_y(-0.5)
        .include_y(1.5)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for outcome in [Outcome::Success, Outcome::Failure] {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .filter(|p| p.outcome == outcome)
                    .map(|p| [p.payload_mass_kg, f64::from(outcome.class())])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(outcome.label())
                        .color(outcome_color(outcome))
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}
