use super::domain::Entity;
use serde::Serialize;

/// Case-insensitive substring match against name or country, in catalog order.
///
/// An empty or whitespace-only query returns every entity.
pub fn filter<'a>(entities: &'a [Entity], query: &str) -> Vec<&'a Entity> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entities.iter().collect();
    }

    entities
        .iter()
        .filter(|entity| {
            entity.name.to_lowercase().contains(&needle)
                || entity.country.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Display window over a search projection.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage<'a> {
    pub visible: Vec<&'a Entity>,
    pub total_matches: usize,
    pub hidden: usize,
}

impl CatalogPage<'_> {
    pub fn has_more(&self) -> bool {
        self.hidden > 0
    }
}

/// Caps the rendered matches at `display_limit` unless `show_all` is set.
pub fn paginate<'a>(
    matches: Vec<&'a Entity>,
    display_limit: usize,
    show_all: bool,
) -> CatalogPage<'a> {
    let total_matches = matches.len();
    let visible: Vec<&Entity> = if show_all {
        matches
    } else {
        matches.into_iter().take(display_limit).collect()
    };
    let hidden = total_matches - visible.len();

    CatalogPage {
        visible,
        total_matches,
        hidden,
    }
}
