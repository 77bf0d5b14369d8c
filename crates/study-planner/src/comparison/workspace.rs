use super::aggregate::{aggregate, AggregateView};
use super::chart::{bars, donut, Bar, ChartError, ChartSlice, DonutChart, DonutGeometry};
use super::selection::{HapticFeedback, NoHaptics, SelectionEvent, SelectionSet};
use crate::catalog::{paginate, CatalogPage, CostCategory, Entity, EntityCatalog, EntityId};
use crate::config::PlannerConfig;
use tracing::debug;

/// Screen-local comparison state: query, show-all flag, and selection.
pub struct ComparisonWorkspace<'c, H = NoHaptics> {
    catalog: &'c EntityCatalog,
    selection: SelectionSet,
    query: String,
    show_all: bool,
    display_limit: usize,
    haptics: H,
}

impl<'c> ComparisonWorkspace<'c, NoHaptics> {
    pub fn new(catalog: &'c EntityCatalog, config: &PlannerConfig) -> Self {
        Self::with_haptics(catalog, config, NoHaptics)
    }
}

impl<'c, H: HapticFeedback> ComparisonWorkspace<'c, H> {
    pub fn with_haptics(catalog: &'c EntityCatalog, config: &PlannerConfig, haptics: H) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(config.selection_capacity),
            query: String::new(),
            show_all: false,
            display_limit: config.display_limit.max(1),
            haptics,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    pub fn visible(&self) -> CatalogPage<'c> {
        paginate(
            self.catalog.search(&self.query),
            self.display_limit,
            self.show_all,
        )
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle(&mut self, id: EntityId) -> SelectionEvent {
        let event = self.selection.toggle(id);
        debug!(?event, selected = self.selection.len(), "selection toggled");
        self.haptics.pulse(event.haptic());
        event
    }

    pub fn clear(&mut self) -> SelectionEvent {
        let event = self.selection.clear();
        debug!(?event, "selection cleared");
        self.haptics.pulse(event.haptic());
        event
    }

    /// Selects the first search hit, replacing any current selection.
    /// A blank query leaves the selection alone.
    pub fn preselect_by_search(&mut self, query: &str) -> Option<&'c Entity> {
        if query.trim().is_empty() {
            return None;
        }
        let found = self.catalog.search(query).into_iter().next()?;
        self.replace_selection(found);
        Some(found)
    }

    /// Selects the entity whose name matches exactly, ignoring case.
    pub fn preselect_by_name(&mut self, name: &str) -> Option<&'c Entity> {
        let found = self.catalog.find_by_name(name)?;
        self.replace_selection(found);
        Some(found)
    }

    fn replace_selection(&mut self, entity: &Entity) {
        self.selection.clear();
        self.selection.toggle(entity.id.clone());
    }

    /// Selected entities in catalog order; dangling ids are skipped.
    pub fn selected(&self) -> Vec<&'c Entity> {
        self.catalog.resolve(self.selection.ids())
    }

    /// `None` when nothing is selected, so callers render a placeholder.
    pub fn aggregate(&self) -> Option<AggregateView> {
        let selected = self.selected();
        if selected.is_empty() {
            return None;
        }
        Some(aggregate(&selected, &CostCategory::ordered()))
    }

    /// Monthly cost split for one selected entity.
    pub fn cost_chart(&self, id: &EntityId) -> Option<Result<DonutChart, ChartError>> {
        if !self.selection.contains(id) {
            return None;
        }
        let entity = self.catalog.get(id)?;
        Some(donut(
            &monthly_slices(entity),
            None,
            DonutGeometry::default(),
        ))
    }

    /// Monthly totals of the selection as bars of at most `max_length`.
    pub fn total_bars(&self, max_length: f64) -> Result<Vec<Bar>, ChartError> {
        let entries: Vec<(String, f64)> = self
            .selected()
            .into_iter()
            .map(|entity| (entity.name.clone(), entity.monthly_total() as f64))
            .collect();
        bars(&entries, max_length)
    }
}

pub fn monthly_slices(entity: &Entity) -> Vec<ChartSlice> {
    CostCategory::ordered()
        .into_iter()
        .filter(|category| !category.is_annual())
        .map(|category| {
            ChartSlice::new(
                category.label(),
                f64::from(entity.costs.amount(category)),
                category.color(),
            )
        })
        .collect()
}
