use super::domain::{CostBreakdown, Entity, EntityId, EntityKind, QualityRatings};
use super::EntityCatalog;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("entity id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("entity '{id}' has unknown kind '{kind}'")]
    UnknownKind { id: String, kind: String },
    #[error("entity '{id}' has {metric} rating {value} outside 0-10")]
    RatingOutOfRange {
        id: String,
        metric: &'static str,
        value: f32,
    },
    #[error("catalog export contained no entities")]
    Empty,
}

/// Loads catalog entities from a CSV export.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<EntityCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<EntityCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut entities = Vec::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let entity = record?.into_entity()?;
            if !seen.insert(entity.id.clone()) {
                return Err(CatalogImportError::DuplicateId(entity.id.0));
            }
            entities.push(entity);
        }

        if entities.is_empty() {
            return Err(CatalogImportError::Empty);
        }

        info!(entities = entities.len(), "catalog imported");
        Ok(EntityCatalog::from_entities(entities))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    kind: String,
    name: String,
    country: String,
    currency: String,
    accommodation: u32,
    food: u32,
    transportation: u32,
    utilities: u32,
    entertainment: u32,
    education: u32,
    safety: f32,
    student_friendly: f32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
}

impl CatalogRow {
    fn into_entity(self) -> Result<Entity, CatalogImportError> {
        let kind = EntityKind::parse(&self.kind).ok_or_else(|| CatalogImportError::UnknownKind {
            id: self.id.clone(),
            kind: self.kind.clone(),
        })?;

        for (metric, value) in [
            ("safety", self.safety),
            ("student_friendly", self.student_friendly),
        ] {
            if !QualityRatings::is_in_range(value) {
                return Err(CatalogImportError::RatingOutOfRange {
                    id: self.id,
                    metric,
                    value,
                });
            }
        }

        Ok(Entity {
            id: EntityId(self.id),
            kind,
            name: self.name,
            country: self.country,
            currency: self.currency.to_ascii_uppercase(),
            description: self.description.unwrap_or_default(),
            costs: CostBreakdown {
                accommodation: self.accommodation,
                food: self.food,
                transportation: self.transportation,
                utilities: self.utilities,
                entertainment: self.entertainment,
                education: self.education,
            },
            quality: QualityRatings {
                safety: self.safety,
                student_friendly: self.student_friendly,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
