use std::sync::Arc;

use crate::data::filter::filter_by_subject;
use crate::data::model::Dataset;
use crate::data::view::{to_chart_series, to_table_rows, ChartSpec, Row};

// ---------------------------------------------------------------------------
// Rendered output for one selection
// ---------------------------------------------------------------------------

/// Everything the two render targets need for one selection.
/// Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub subject: String,
    /// Number of the update that produced this output; starts at 0.
    pub generation: u64,
    pub chart: ChartSpec,
    pub rows: Vec<Row>,
}

impl RenderOutput {
    fn compute(dataset: &Dataset, subject: &str, generation: u64) -> Self {
        let view = filter_by_subject(dataset, subject);
        RenderOutput {
            subject: subject.to_string(),
            generation,
            chart: to_chart_series(subject, &view),
            rows: to_table_rows(&view),
        }
    }
}

// ---------------------------------------------------------------------------
// Interaction controller
// ---------------------------------------------------------------------------

/// `Updating` only lasts for the body of [`Controller::process`], which holds
/// `&mut self`, so [`Controller::phase`] always reports `Idle` to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user.
    Idle,
    /// Recomputing outputs for a new selection.
    Updating,
}

/// Binds the subject selection to the chart and table outputs.
///
/// Selections are queued with [`Controller::request`] and applied by
/// [`Controller::process`]. Only the most recent request survives, so a
/// burst of selections produces a single update for the last one.
pub struct Controller {
    dataset: Arc<Dataset>,
    selection: String,
    phase: Phase,
    pending: Option<String>,
    output: RenderOutput,
}

impl Controller {
    /// Start Idle on the default subject with its output already rendered.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = dataset.default_subject().to_string();
        let output = RenderOutput::compute(&dataset, &selection, 0);
        log::info!("Initial subject: {selection}");
        Self {
            dataset,
            selection,
            phase: Phase::Idle,
            pending: None,
            output,
        }
    }

    /// Queue a selection, replacing any selection not yet processed.
    pub fn request(&mut self, subject: impl Into<String>) {
        let subject = subject.into();
        if let Some(stale) = self.pending.replace(subject) {
            log::debug!("Discarding superseded selection {stale:?}");
        }
    }

    /// Apply the pending selection, if any. Returns true when an update ran.
    pub fn process(&mut self) -> bool {
        let Some(subject) = self.pending.take() else {
            return false;
        };

        self.phase = Phase::Updating;
        log::info!("Selected subject: {subject}");
        let generation = self.output.generation + 1;
        let output = RenderOutput::compute(&self.dataset, &subject, generation);
        self.selection = subject;
        self.output = output;
        self.phase = Phase::Idle;
        true
    }

    /// Request and immediately process a selection.
    pub fn select(&mut self, subject: impl Into<String>) -> &RenderOutput {
        self.request(subject);
        self.process();
        &self.output
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn controller() -> Controller {
        Controller::new(Arc::new(sample_dataset()))
    }

    #[test]
    fn starts_idle_on_default_subject() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.selection(), "Math");
        assert_eq!(c.output().generation, 0);
        assert_eq!(c.output().rows.len(), 2);
        assert_eq!(c.output().chart.series.len(), 2);
    }

    #[test]
    fn selecting_updates_both_outputs() {
        let mut c = controller();
        let out = c.select("Science");
        assert_eq!(out.subject, "Science");
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.chart.series[0].student, "A");
        assert_eq!(c.selection(), "Science");
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn only_latest_pending_selection_is_applied() {
        let mut c = controller();
        c.request("Science");
        c.request("History");
        c.request("Science");
        assert!(c.has_pending());
        assert!(c.process());
        assert!(!c.process());

        assert_eq!(c.output().generation, 1);
        assert_eq!(c.output().subject, "Science");
    }

    #[test]
    fn out_of_catalog_selection_renders_empty() {
        let mut c = controller();
        let out = c.select("History");
        assert!(out.rows.is_empty());
        assert!(out.chart.series.is_empty());
        assert_eq!(c.selection(), "History");
    }

    #[test]
    fn reselecting_is_idempotent() {
        let mut c = controller();
        let first = c.select("Math").clone();
        let second = c.select("Math").clone();
        assert_eq!(first.chart, second.chart);
        assert_eq!(first.rows, second.rows);
        assert_eq!(second.generation, first.generation + 1);
    }
}
