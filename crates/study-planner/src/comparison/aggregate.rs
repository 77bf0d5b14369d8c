use crate::catalog::{CostCategory, Entity, EntityId, QualityMetric};
use serde::Serialize;

/// One entity's figure within a comparison row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    pub entity_id: EntityId,
    pub entity_name: String,
    pub value: u64,
    pub is_max: bool,
    pub is_min: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: CostCategory,
    pub label: &'static str,
    pub annual: bool,
    pub max: u64,
    pub min: u64,
    pub cells: Vec<ComparisonCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityCell {
    pub entity_id: EntityId,
    pub rating: f32,
    pub is_best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityComparison {
    pub metric: QualityMetric,
    pub label: &'static str,
    pub cells: Vec<QualityCell>,
}

/// Derived comparison figures for the current selection. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateView {
    pub categories: Vec<CategoryComparison>,
    /// Monthly totals (annual categories excluded), highlighted like a category row.
    pub monthly_totals: Vec<ComparisonCell>,
    /// Annual-category totals per entity, reported separately.
    pub annual_totals: Vec<ComparisonCell>,
    pub quality: Vec<QualityComparison>,
}

impl AggregateView {
    pub fn is_empty(&self) -> bool {
        self.monthly_totals.is_empty()
    }

    pub fn category(&self, category: CostCategory) -> Option<&CategoryComparison> {
        self.categories.iter().find(|row| row.category == category)
    }

    pub fn monthly_total(&self, id: &EntityId) -> Option<u64> {
        self.monthly_totals
            .iter()
            .find(|cell| &cell.entity_id == id)
            .map(|cell| cell.value)
    }
}

/// Compares `entities` across `categories`.
///
/// Highlighting needs at least two entities. Ties resolve to the first entity
/// in input order, so each row has exactly one max and one min cell.
pub fn aggregate(entities: &[&Entity], categories: &[CostCategory]) -> AggregateView {
    if entities.is_empty() {
        return AggregateView::default();
    }

    let categories = categories
        .iter()
        .map(|&category| {
            let values: Vec<u64> = entities
                .iter()
                .map(|entity| u64::from(entity.costs.amount(category)))
                .collect();
            let (cells, max, min) = highlight(entities, &values);
            CategoryComparison {
                category,
                label: category.label(),
                annual: category.is_annual(),
                max,
                min,
                cells,
            }
        })
        .collect();

    let monthly: Vec<u64> = entities.iter().map(|entity| entity.monthly_total()).collect();
    let (monthly_totals, _, _) = highlight(entities, &monthly);

    let annual: Vec<u64> = entities
        .iter()
        .map(|entity| entity.costs.annual_total())
        .collect();
    let (annual_totals, _, _) = highlight(entities, &annual);

    let quality = QualityMetric::ordered()
        .into_iter()
        .map(|metric| compare_quality(entities, metric))
        .collect();

    AggregateView {
        categories,
        monthly_totals,
        annual_totals,
        quality,
    }
}

fn highlight(entities: &[&Entity], values: &[u64]) -> (Vec<ComparisonCell>, u64, u64) {
    let max = values.iter().copied().max().unwrap_or_default();
    let min = values.iter().copied().min().unwrap_or_default();
    let comparable = entities.len() >= 2;
    let max_index = values.iter().position(|&value| value == max);
    let min_index = values.iter().position(|&value| value == min);

    let cells = entities
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (entity, &value))| ComparisonCell {
            entity_id: entity.id.clone(),
            entity_name: entity.name.clone(),
            value,
            is_max: comparable && max_index == Some(index),
            is_min: comparable && min_index == Some(index),
        })
        .collect();

    (cells, max, min)
}

fn compare_quality(entities: &[&Entity], metric: QualityMetric) -> QualityComparison {
    let ratings: Vec<f32> = entities
        .iter()
        .map(|entity| entity.quality.rating(metric))
        .collect();
    let best_index = ratings
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (index, &rating)| match best {
            Some((_, top)) if top >= rating => best,
            _ => Some((index, rating)),
        })
        .map(|(index, _)| index);
    let comparable = entities.len() >= 2;

    let cells = entities
        .iter()
        .zip(&ratings)
        .enumerate()
        .map(|(index, (entity, &rating))| QualityCell {
            entity_id: entity.id.clone(),
            rating,
            is_best: comparable && best_index == Some(index),
        })
        .collect();

    QualityComparison {
        metric,
        label: metric.label(),
        cells,
    }
}
