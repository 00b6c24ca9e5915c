use crate::config::DashboardConfig;
use crate::data::aggregate::{self, AreaTotals, Statistics};
use crate::data::filter::{self, FilteredView, Selection};
use crate::data::model::{Dataset, DatasetKind};

// ---------------------------------------------------------------------------
// Dashboard selection: one Selection per dataset plus the pie domain
// ---------------------------------------------------------------------------

/// Everything the sidebar lets the user choose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSelection {
    pub ireland: Selection,
    pub world: Selection,
    /// Domain picked for the pie chart; options come from the Ireland table.
    pub pie_domain: Option<String>,
}

impl DashboardSelection {
    /// Empty filters; the pie domain starts at the first Ireland domain.
    pub fn initial(ireland: &Dataset) -> Self {
        Self {
            pie_domain: ireland.domains.first().cloned(),
            ..Default::default()
        }
    }

    pub fn get(&self, kind: DatasetKind) -> &Selection {
        match kind {
            DatasetKind::Ireland => &self.ireland,
            DatasetKind::World => &self.world,
        }
    }

    pub fn get_mut(&mut self, kind: DatasetKind) -> &mut Selection {
        match kind {
            DatasetKind::Ireland => &mut self.ireland,
            DatasetKind::World => &mut self.world,
        }
    }
}

// ---------------------------------------------------------------------------
// Pie routing
// ---------------------------------------------------------------------------

/// Which filtered view feeds the pie chart.
///
/// Only the Ireland selection is consulted: a domain outside it routes to the
/// World view even if the World selection does not contain it either.
pub fn resolve_pie_target(pie_domain: Option<&str>, ireland: &Selection) -> DatasetKind {
    match pie_domain {
        Some(domain) if ireland.domains.contains(domain) => DatasetKind::Ireland,
        _ => DatasetKind::World,
    }
}

// ---------------------------------------------------------------------------
// Render model
// ---------------------------------------------------------------------------

/// Derived views for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetPanel<'a> {
    pub kind: DatasetKind,
    pub total_rows: usize,
    pub view: FilteredView<'a>,
    pub stats: Statistics,
    /// Mean value per year (bar and line charts).
    pub yearly: Vec<(i64, f64)>,
}

impl<'a> DatasetPanel<'a> {
    fn build(dataset: &'a Dataset, selection: &Selection) -> Self {
        let view = filter::filter(dataset, selection);
        let stats = aggregate::describe(&view);
        let yearly = aggregate::mean_by_year(&view);
        Self {
            kind: dataset.kind,
            total_rows: dataset.len(),
            view,
            stats,
            yearly,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieModel {
    pub domain: Option<String>,
    pub source: DatasetKind,
    pub totals: AreaTotals,
}

#[derive(Debug, Clone)]
pub struct ChoroplethModel {
    /// Import + Export totals per World area, divided by `factor`.
    pub totals: AreaTotals,
    pub factor: f64,
}

/// Everything one render pass draws.
#[derive(Debug, Clone)]
pub struct RenderModel<'a> {
    pub preview_rows: usize,
    pub ireland: DatasetPanel<'a>,
    pub world: DatasetPanel<'a>,
    pub pie: PieModel,
    pub choropleth: ChoroplethModel,
}

impl<'a> RenderModel<'a> {
    pub fn panel(&self, kind: DatasetKind) -> &DatasetPanel<'a> {
        match kind {
            DatasetKind::Ireland => &self.ireland,
            DatasetKind::World => &self.world,
        }
    }
}

/// Re-run the whole filter → aggregate pipeline for the current selection.
pub fn build_render_model<'a>(
    ireland: &'a Dataset,
    world: &'a Dataset,
    selection: &DashboardSelection,
    config: &DashboardConfig,
) -> RenderModel<'a> {
    let ireland_panel = DatasetPanel::build(ireland, &selection.ireland);
    let world_panel = DatasetPanel::build(world, &selection.world);
    log::debug!(
        "Filtered Ireland rows: {}, filtered World rows: {}",
        ireland_panel.view.len(),
        world_panel.view.len()
    );

    let source = resolve_pie_target(selection.pie_domain.as_deref(), &selection.ireland);
    let pie_view = match source {
        DatasetKind::Ireland => &ireland_panel.view,
        DatasetKind::World => &world_panel.view,
    };
    let pie = PieModel {
        domain: selection.pie_domain.clone(),
        source,
        totals: aggregate::sum_by_area(pie_view.iter()),
    };

    let choropleth = ChoroplethModel {
        totals: choropleth_totals(world, config.normalize_factor),
        factor: config.normalize_factor,
    };

    RenderModel {
        preview_rows: config.preview_rows,
        ireland: ireland_panel,
        world: world_panel,
        pie,
        choropleth,
    }
}

/// Import/export totals per area over the whole World table, ignoring filters.
pub fn choropleth_totals(world: &Dataset, factor: f64) -> AreaTotals {
    let totals = aggregate::sum_by_area(world.records.iter().filter(|r| r.is_trade_value()));
    aggregate::normalize(&totals, factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, EXPORT_VALUE, IMPORT_VALUE};
    use std::path::PathBuf;

    fn ireland() -> Dataset {
        Dataset::from_records(
            DatasetKind::Ireland,
            PathBuf::new(),
            vec![
                Record::new(2020, "Agriculture", "EU", IMPORT_VALUE, 100.0),
                Record::new(2021, "Agriculture", "EU", EXPORT_VALUE, 50.0),
                Record::new(2020, "Forestry", "UK", IMPORT_VALUE, 30.0),
            ],
        )
    }

    fn world() -> Dataset {
        Dataset::from_records(
            DatasetKind::World,
            PathBuf::new(),
            vec![
                Record::new(2020, "Agriculture", "France", IMPORT_VALUE, 2000.0),
                Record::new(2020, "Agriculture", "France", EXPORT_VALUE, 1000.0),
                Record::new(2020, "Agriculture", "France", "Import Quantity", 999.0),
                Record::new(2021, "Fisheries", "Chile", EXPORT_VALUE, 500.0),
            ],
        )
    }

    fn config() -> DashboardConfig {
        DashboardConfig::default()
    }

    fn select_all(ds: &Dataset) -> Selection {
        Selection::all_of(ds)
    }

    #[test]
    fn test_initial_selection_is_empty_with_first_pie_domain() {
        let sel = DashboardSelection::initial(&ireland());
        assert!(sel.ireland.years.is_empty());
        assert!(sel.world.domains.is_empty());
        assert_eq!(sel.pie_domain.as_deref(), Some("Agriculture"));
    }

    #[test]
    fn test_default_dashboard_shows_nothing() {
        let (ie, wd) = (ireland(), world());
        let model = build_render_model(&ie, &wd, &DashboardSelection::initial(&ie), &config());
        assert!(model.ireland.view.is_empty());
        assert!(model.world.view.is_empty());
        assert_eq!(model.ireland.stats.value.count, 0);
        assert!(model.pie.totals.is_empty());
        // The choropleth ignores the filters.
        assert!(!model.choropleth.totals.is_empty());
    }

    #[test]
    fn test_pie_routes_to_ireland_when_domain_selected_there() {
        let ie_sel = Selection {
            domains: ["Agriculture".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(
            resolve_pie_target(Some("Agriculture"), &ie_sel),
            DatasetKind::Ireland
        );
    }

    #[test]
    fn test_pie_routes_to_world_without_checking_world_selection() {
        let ie_sel = Selection::default();
        assert_eq!(
            resolve_pie_target(Some("Agriculture"), &ie_sel),
            DatasetKind::World
        );
        assert_eq!(resolve_pie_target(None, &ie_sel), DatasetKind::World);
    }

    #[test]
    fn test_pie_uses_routed_view_totals() {
        let (ie, wd) = (ireland(), world());
        let selection = DashboardSelection {
            ireland: select_all(&ie),
            world: select_all(&wd),
            pie_domain: Some("Agriculture".to_string()),
        };
        let model = build_render_model(&ie, &wd, &selection, &config());
        assert_eq!(model.pie.source, DatasetKind::Ireland);
        // Whole Ireland view, not only the pie domain.
        assert_eq!(model.pie.totals.get("EU"), Some(150.0));
        assert_eq!(model.pie.totals.get("UK"), Some(30.0));

        let selection = DashboardSelection {
            pie_domain: Some("Forestry".to_string()),
            ireland: Selection {
                domains: ["Agriculture".to_string()].into_iter().collect(),
                ..select_all(&ie)
            },
            world: select_all(&wd),
        };
        let model = build_render_model(&ie, &wd, &selection, &config());
        assert_eq!(model.pie.source, DatasetKind::World);
        assert_eq!(model.pie.totals.get("France"), Some(3999.0));
    }

    #[test]
    fn test_choropleth_keeps_only_trade_values_and_normalizes() {
        let totals = choropleth_totals(&world(), 1000.0);
        assert_eq!(totals.get("France"), Some(3.0));
        assert_eq!(totals.get("Chile"), Some(0.5));
    }

    #[test]
    fn test_panels_follow_their_own_selection() {
        let (ie, wd) = (ireland(), world());
        let selection = DashboardSelection {
            ireland: Selection {
                years: [2020].into_iter().collect(),
                ..select_all(&ie)
            },
            world: Selection::default(),
            pie_domain: None,
        };
        let model = build_render_model(&ie, &wd, &selection, &config());
        assert_eq!(model.panel(DatasetKind::Ireland).view.len(), 2);
        assert_eq!(model.panel(DatasetKind::World).view.len(), 0);
        assert_eq!(model.ireland.yearly, vec![(2020, 65.0)]);
        assert_eq!(model.ireland.total_rows, 3);
        assert_eq!(model.preview_rows, config().preview_rows);
    }

    #[test]
    fn test_selection_accessors() {
        let mut sel = DashboardSelection::default();
        sel.get_mut(DatasetKind::World).years.insert(2020);
        assert!(sel.get(DatasetKind::World).years.contains(&2020));
        assert!(sel.get(DatasetKind::Ireland).years.is_empty());
    }
}
