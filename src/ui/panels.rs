use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::SiteChoice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Site selector ----
    ui.strong("Launch site");
    let current = state.selection.site.clone();
    let mut chosen: Option<SiteChoice> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            let options = std::iter::once(SiteChoice::All)
                .chain(dataset.sites().iter().cloned().map(SiteChoice::Site));
            for option in options {
                let label = option.to_string();
                if ui.selectable_label(current == option, label).clicked() {
                    chosen = Some(option);
                }
            }
        });
    if let Some(site) = chosen {
        state.select_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let lo = state.payload_bounds.min_kg();
    let hi = state.payload_bounds.max_kg();
    let step = state.payload_step;

    let mut min_kg = state.selection.payload.min_kg();
    if ui
        .add(egui::Slider::new(&mut min_kg, lo..=hi).step_by(step).text("min"))
        .changed()
    {
        state.set_payload_min(min_kg);
    }

    let mut max_kg = state.selection.payload.max_kg();
    if ui
        .add(egui::Slider::new(&mut max_kg, lo..=hi).step_by(step).text("max"))
        .changed()
    {
        state.set_payload_max(max_kg);
    }

    if ui.small_button("Reset range").clicked() {
        state.set_payload_min(lo);
        state.set_payload_max(hi);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.scatter.as_ref().map_or(0, |s| s.points.len());
            ui.label(format!("{} launches loaded, {} in scatter", ds.len(), visible));
        }

        if let Some(source) = &state.source {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
