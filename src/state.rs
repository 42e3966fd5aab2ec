use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::PieSeries;
use crate::data::filter::ScatterSeries;
use crate::data::loader::load_file;
use crate::data::model::{LaunchTable, PayloadRange, SiteChoice};
use crate::dispatch::{Dispatcher, Figure, InputId, OutputId, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<LaunchTable>>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Current control values.
    pub selection: Selection,

    /// Full payload span of the dataset; the sliders move inside it.
    pub payload_bounds: PayloadRange,

    /// Slider increment in kilograms.
    pub payload_step: f64,

    /// Latest figures produced by the dispatcher.
    pub pie: Option<PieSeries>,
    pub scatter: Option<ScatterSeries>,

    /// Slice colours for the loaded dataset.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, payload_step: f64) -> Self {
        Self {
            dataset: None,
            source: None,
            selection: Selection::default(),
            payload_bounds: PayloadRange::default(),
            payload_step,
            pie: None,
            scatter: None,
            color_map: None,
            status_message: None,
            dispatcher,
        }
    }

    /// Load a dataset from disk. On failure the current dataset is kept.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites ({})",
                    dataset.len(),
                    dataset.sites().len(),
                    path.display()
                );
                self.set_dataset(dataset, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset the controls and redraw everything.
    pub fn set_dataset(&mut self, dataset: LaunchTable, source: Option<PathBuf>) {
        let bounds = dataset.full_payload_range();
        self.color_map = Some(ColorMap::new(dataset.sites()));
        self.payload_bounds = bounds;
        self.selection = Selection {
            site: SiteChoice::All,
            payload: bounds,
        };

        let dataset = Arc::new(dataset);
        let results = self.dispatcher.fire_all(&dataset, &self.selection);
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.apply(results);
    }

    pub fn select_site(&mut self, site: SiteChoice) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.input_changed(InputId::SiteDropdown);
    }

    /// Move the lower slider; the upper one follows if it would be passed.
    pub fn set_payload_min(&mut self, min_kg: f64) {
        let min_kg = self.clamp_to_bounds(min_kg);
        let max_kg = self.selection.payload.max_kg().max(min_kg);
        self.set_payload_range(min_kg, max_kg);
    }

    /// Move the upper slider; the lower one follows if it would be passed.
    pub fn set_payload_max(&mut self, max_kg: f64) {
        let max_kg = self.clamp_to_bounds(max_kg);
        let min_kg = self.selection.payload.min_kg().min(max_kg);
        self.set_payload_range(min_kg, max_kg);
    }

    fn clamp_to_bounds(&self, kg: f64) -> f64 {
        kg.clamp(self.payload_bounds.min_kg(), self.payload_bounds.max_kg())
    }

    fn set_payload_range(&mut self, min_kg: f64, max_kg: f64) {
        let range = match PayloadRange::new(min_kg, max_kg) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("Ignoring payload selection: {e}");
                return;
            }
        };
        if range == self.selection.payload {
            return;
        }
        self.selection.payload = range;
        self.input_changed(InputId::PayloadSlider);
    }

    fn input_changed(&mut self, input: InputId) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let results = self.dispatcher.dispatch(input, dataset, &self.selection);
        self.apply(results);
    }

    fn apply(&mut self, results: Vec<(OutputId, Figure)>) {
        for (output, figure) in results {
            match (output, figure) {
                (OutputId::SuccessPieChart, Figure::Pie(pie)) => self.pie = Some(pie),
                (OutputId::SuccessPayloadScatter, Figure::Scatter(series)) => {
                    self.scatter = Some(series)
                }
                (output, figure) => {
                    log::warn!("Output {output:?} cannot display {figure:?}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};
    use crate::dispatch::dashboard_dispatcher;
    use std::io::Write;

    fn state_with_scenario() -> AppState {
        let mut state = AppState::new(dashboard_dispatcher().unwrap(), 100.0);
        state.set_dataset(
            LaunchTable::from_records(vec![
                LaunchRecord::new("KSC", Some(5000.0), Outcome::Success),
                LaunchRecord::new("KSC", Some(3000.0), Outcome::Failure),
                LaunchRecord::new("CCAFS", Some(2000.0), Outcome::Success),
            ]),
            None,
        );
        state
    }

    #[test]
    fn new_dataset_resets_controls_and_renders() {
        let state = state_with_scenario();
        assert_eq!(state.selection.site, SiteChoice::All);
        assert_eq!(state.selection.payload, PayloadRange::new(2000.0, 5000.0).unwrap());
        assert_eq!(state.pie.as_ref().unwrap().total(), 2);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 3);
    }

    #[test]
    fn selecting_site_redraws_both_charts() {
        let mut state = state_with_scenario();
        state.select_site(SiteChoice::Site("KSC".into()));
        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Success vs Failed Launches (KSC)");
        let scatter = state.scatter.as_ref().unwrap();
        assert_eq!(scatter.title, "Success vs Payload for KSC");
        assert_eq!(scatter.points.len(), 2);
    }

    #[test]
    fn sliders_stay_ordered_and_clamped() {
        let mut state = state_with_scenario();
        state.set_payload_min(4000.0);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 1);

        state.set_payload_max(2500.0);
        assert_eq!(state.selection.payload, PayloadRange::new(2500.0, 2500.0).unwrap());
        assert!(state.scatter.as_ref().unwrap().is_empty());

        state.set_payload_min(-100.0);
        assert_eq!(state.selection.payload.min_kg(), 2000.0);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = state_with_scenario();
        let mut bad = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        bad.write_all(b"Launch Site,class\nKSC,1\n").unwrap();

        state.load_path(bad.path());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn successful_load_replaces_dataset() {
        let mut state = state_with_scenario();
        let mut good = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        good.write_all(b"Launch Site,Payload Mass (kg),class\nVAFB,9600,1\n").unwrap();

        state.load_path(good.path());
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.as_ref().unwrap().sites(), ["VAFB".to_string()]);
        assert_eq!(state.source.as_deref(), Some(good.path()));
        assert_eq!(state.pie.as_ref().unwrap().slices.len(), 1);
    }
}
