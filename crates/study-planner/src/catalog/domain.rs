use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    City,
    University,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::University => "University",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "city" => Some(Self::City),
            "university" | "uni" => Some(Self::University),
            _ => None,
        }
    }
}

/// Cost dimensions compared across entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Accommodation,
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Education,
}

impl CostCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Accommodation,
            Self::Food,
            Self::Transportation,
            Self::Utilities,
            Self::Entertainment,
            Self::Education,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accommodation => "Accommodation",
            Self::Food => "Food & Groceries",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Education => "Education",
        }
    }

    /// Annual categories are reported per year and never enter monthly roll-ups.
    pub const fn is_annual(self) -> bool {
        matches!(self, Self::Education)
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Accommodation => "#0d98ba",
            Self::Food => "#f59e0b",
            Self::Transportation => "#10b981",
            Self::Utilities => "#6366f1",
            Self::Entertainment => "#ec4899",
            Self::Education => "#8b5cf6",
        }
    }
}

/// Cost amounts in whole units of the reporting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub accommodation: u32,
    pub food: u32,
    pub transportation: u32,
    pub utilities: u32,
    pub entertainment: u32,
    /// Tuition per year.
    pub education: u32,
}

impl CostBreakdown {
    pub const fn amount(&self, category: CostCategory) -> u32 {
        match category {
            CostCategory::Accommodation => self.accommodation,
            CostCategory::Food => self.food,
            CostCategory::Transportation => self.transportation,
            CostCategory::Utilities => self.utilities,
            CostCategory::Entertainment => self.entertainment,
            CostCategory::Education => self.education,
        }
    }

    pub fn monthly_total(&self) -> u64 {
        CostCategory::ordered()
            .into_iter()
            .filter(|category| !category.is_annual())
            .map(|category| u64::from(self.amount(category)))
            .sum()
    }

    pub fn annual_total(&self) -> u64 {
        CostCategory::ordered()
            .into_iter()
            .filter(|category| category.is_annual())
            .map(|category| u64::from(self.amount(category)))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityMetric {
    Safety,
    StudentFriendly,
}

impl QualityMetric {
    pub const MAX_RATING: f32 = 10.0;

    pub const fn ordered() -> [Self; 2] {
        [Self::Safety, Self::StudentFriendly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Safety => "Safety",
            Self::StudentFriendly => "Student Friendly",
        }
    }
}

/// Ratings on a 0-10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityRatings {
    pub safety: f32,
    pub student_friendly: f32,
}

impl QualityRatings {
    pub const fn rating(&self, metric: QualityMetric) -> f32 {
        match metric {
            QualityMetric::Safety => self.safety,
            QualityMetric::StudentFriendly => self.student_friendly,
        }
    }

    pub fn is_in_range(rating: f32) -> bool {
        rating.is_finite() && (0.0..=QualityMetric::MAX_RATING).contains(&rating)
    }
}

/// A comparable catalog item. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub country: String,
    /// Local currency code, informational only; `costs` are pre-converted.
    pub currency: String,
    #[serde(default)]
    pub description: String,
    pub costs: CostBreakdown,
    pub quality: QualityRatings,
}

impl Entity {
    pub fn monthly_total(&self) -> u64 {
        self.costs.monthly_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_total_excludes_annual_categories() {
        let costs = CostBreakdown {
            accommodation: 700,
            food: 300,
            education: 500,
            ..CostBreakdown::default()
        };

        assert_eq!(costs.monthly_total(), 1000);
        assert_eq!(costs.annual_total(), 500);
    }

    #[test]
    fn only_education_is_annual() {
        let annual: Vec<_> = CostCategory::ordered()
            .into_iter()
            .filter(|category| category.is_annual())
            .collect();
        assert_eq!(annual, vec![CostCategory::Education]);
    }

    #[test]
    fn rating_range_is_inclusive() {
        assert!(QualityRatings::is_in_range(0.0));
        assert!(QualityRatings::is_in_range(10.0));
        assert!(!QualityRatings::is_in_range(10.5));
        assert!(!QualityRatings::is_in_range(f32::NAN));
    }
}
