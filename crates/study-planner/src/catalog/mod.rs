//! Immutable catalog of comparable cities and universities.

pub mod domain;
mod import;
pub mod search;
mod seed;

pub use domain::{
    CostBreakdown, CostCategory, Entity, EntityId, EntityKind, QualityMetric, QualityRatings,
};
pub use import::{CatalogImportError, CatalogImporter};
pub use search::{filter, paginate, CatalogPage};

#[derive(Debug, Clone)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
}

impl EntityCatalog {
    /// Currency the built-in catalog amounts are priced in.
    pub const STANDARD_PRICING_CURRENCY: &'static str = "USD";

    /// The built-in city catalog, costs in USD.
    pub fn standard() -> Self {
        Self::from_entities(seed::standard_cities())
    }

    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| &entity.id == id)
    }

    /// Looks up entities by exact, case-insensitive name.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        let name = name.trim();
        self.entities
            .iter()
            .find(|entity| entity.name.eq_ignore_ascii_case(name))
    }

    /// Entities referenced by `ids`, in catalog order. Unknown ids are dropped.
    pub fn resolve<'a>(&'a self, ids: &[EntityId]) -> Vec<&'a Entity> {
        self.entities
            .iter()
            .filter(|entity| ids.contains(&entity.id))
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&Entity> {
        filter(&self.entities, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_ids() {
        let catalog = EntityCatalog::standard();
        let mut ids: Vec<_> = catalog.entities().iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn resolve_drops_dangling_ids_and_keeps_catalog_order() {
        let catalog = EntityCatalog::standard();
        let resolved = catalog.resolve(&[
            EntityId::from("paris"),
            EntityId::from("atlantis"),
            EntityId::from("london"),
        ]);

        let ids: Vec<&str> = resolved.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["london", "paris"]);
    }

    #[test]
    fn find_by_name_ignores_case() {
        let catalog = EntityCatalog::standard();
        let berlin = catalog.find_by_name("BERLIN").expect("berlin present");
        assert_eq!(berlin.country, "Germany");
    }
}
