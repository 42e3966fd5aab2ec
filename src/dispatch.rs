use thiserror::Error;

use crate::data::aggregate::{PieSeries, success_distribution};
use crate::data::filter::{ScatterSeries, filtered_scatter_series};
use crate::data::model::{LaunchTable, PayloadRange, SiteChoice};

// ---------------------------------------------------------------------------
// Declared inputs, outputs and the figures flowing between them
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatter,
}

/// Current value of every declared input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub site: SiteChoice,
    pub payload: PayloadRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieSeries),
    Scatter(ScatterSeries),
}

pub type Handler = fn(&LaunchTable, &Selection) -> Figure;

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("output {0:?} already has a handler")]
    DuplicateOutput(OutputId),
    #[error("handler for {0:?} declares no inputs")]
    NoInputs(OutputId),
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

struct Binding {
    output: OutputId,
    inputs: Vec<InputId>,
    handler: Handler,
}

/// Maps input changes to the handlers that depend on them.
///
/// Each output has exactly one handler. Handlers run synchronously, in
/// registration order, with the full current [`Selection`].
#[derive(Default)]
pub struct Dispatcher {
    bindings: Vec<Binding>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        output: OutputId,
        inputs: &[InputId],
        handler: Handler,
    ) -> Result<(), DispatchError> {
        if inputs.is_empty() {
            return Err(DispatchError::NoInputs(output));
        }
        if self.bindings.iter().any(|b| b.output == output) {
            return Err(DispatchError::DuplicateOutput(output));
        }
        self.bindings.push(Binding {
            output,
            inputs: inputs.to_vec(),
            handler,
        });
        Ok(())
    }

    /// Re-run every handler that declares `changed` as an input.
    pub fn dispatch(
        &self,
        changed: InputId,
        table: &LaunchTable,
        selection: &Selection,
    ) -> Vec<(OutputId, Figure)> {
        log::debug!("dispatching {changed:?} with {selection:?}");
        self.bindings
            .iter()
            .filter(|b| b.inputs.contains(&changed))
            .map(|b| (b.output, (b.handler)(table, selection)))
            .collect()
    }

    /// Run every handler once, as on first render.
    pub fn fire_all(&self, table: &LaunchTable, selection: &Selection) -> Vec<(OutputId, Figure)> {
        self.bindings
            .iter()
            .map(|b| (b.output, (b.handler)(table, selection)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dashboard wiring
// ---------------------------------------------------------------------------

fn update_pie_chart(table: &LaunchTable, selection: &Selection) -> Figure {
    Figure::Pie(success_distribution(table, &selection.site))
}

fn update_scatter_chart(table: &LaunchTable, selection: &Selection) -> Figure {
    Figure::Scatter(filtered_scatter_series(
        table,
        &selection.site,
        selection.payload,
    ))
}

/// The pie listens to the site selector; the scatter listens to both controls.
pub fn dashboard_dispatcher() -> Result<Dispatcher, DispatchError> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(
        OutputId::SuccessPieChart,
        &[InputId::SiteDropdown],
        update_pie_chart,
    )?;
    dispatcher.register(
        OutputId::SuccessPayloadScatter,
        &[InputId::SiteDropdown, InputId::PayloadSlider],
        update_scatter_chart,
    )?;
    Ok(dispatcher)
}
