use crate::config::DashboardConfig;
use crate::data::filter::Selection;
use crate::data::model::{Dataset, DatasetKind};
use crate::pipeline::{self, DashboardSelection, RenderModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    pub ireland: Dataset,
    pub world: Dataset,

    /// Sidebar choices for both datasets.
    pub selection: DashboardSelection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, ireland: Dataset, world: Dataset) -> Self {
        let selection = DashboardSelection::initial(&ireland);
        Self {
            config,
            ireland,
            world,
            selection,
            status_message: None,
        }
    }

    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Ireland => &self.ireland,
            DatasetKind::World => &self.world,
        }
    }

    /// Swap in a freshly loaded table and clear the filters that referred to
    /// the old one.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        let kind = dataset.kind;
        *self.selection.get_mut(kind) = Selection::default();

        if kind == DatasetKind::Ireland {
            let still_offered = self
                .selection
                .pie_domain
                .as_ref()
                .is_some_and(|d| dataset.domains.contains(d));
            if !still_offered {
                self.selection.pie_domain = dataset.domains.first().cloned();
            }
        }

        match kind {
            DatasetKind::Ireland => self.ireland = dataset,
            DatasetKind::World => self.world = dataset,
        }
        self.status_message = None;
    }

    /// Run the pipeline for the current selection.
    pub fn render_model(&self) -> RenderModel<'_> {
        pipeline::build_render_model(&self.ireland, &self.world, &self.selection, &self.config)
    }
}
