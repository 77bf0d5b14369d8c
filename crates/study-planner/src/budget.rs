use crate::catalog::{CostBreakdown, CostCategory};
use crate::comparison::{donut, ChartError, ChartSlice, DonutChart, DonutGeometry};
use serde::{Deserialize, Serialize};

/// A student's planned monthly spend.
///
/// Unlike catalog breakdowns, every amount here is monthly, education
/// included ("Education & Materials").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub currency: String,
    pub amounts: CostBreakdown,
}

impl MonthlyBudget {
    pub fn new(currency: impl Into<String>, amounts: CostBreakdown) -> Self {
        Self {
            currency: currency.into().trim().to_ascii_uppercase(),
            amounts,
        }
    }

    /// Starting plan shown before the user edits anything.
    pub fn starter(currency: impl Into<String>) -> Self {
        Self::new(
            currency,
            CostBreakdown {
                accommodation: 800,
                food: 300,
                transportation: 100,
                utilities: 150,
                entertainment: 200,
                education: 1500,
            },
        )
    }

    /// Applies raw user input; anything that does not parse counts as zero.
    pub fn set_amount(&mut self, category: CostCategory, raw: &str) {
        let value = parse_amount(raw);
        let slot = match category {
            CostCategory::Accommodation => &mut self.amounts.accommodation,
            CostCategory::Food => &mut self.amounts.food,
            CostCategory::Transportation => &mut self.amounts.transportation,
            CostCategory::Utilities => &mut self.amounts.utilities,
            CostCategory::Entertainment => &mut self.amounts.entertainment,
            CostCategory::Education => &mut self.amounts.education,
        };
        *slot = value;
    }

    pub fn total_monthly(&self) -> u64 {
        CostCategory::ordered()
            .into_iter()
            .map(|category| u64::from(self.amounts.amount(category)))
            .sum()
    }

    pub fn summary(&self) -> BudgetSummary {
        let total_monthly = self.total_monthly();
        let shares = CostCategory::ordered()
            .into_iter()
            .map(|category| {
                let amount = self.amounts.amount(category);
                CategoryShare {
                    category,
                    label: budget_label(category),
                    amount,
                    percentage: share(u64::from(amount), total_monthly),
                }
            })
            .collect();

        BudgetSummary {
            currency: self.currency.clone(),
            total_monthly,
            total_yearly: total_monthly * 12,
            accommodation_share_pct: share(
                u64::from(self.amounts.accommodation),
                total_monthly,
            )
            .round() as u8,
            shares,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: CostCategory,
    pub label: &'static str,
    pub amount: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub currency: String,
    pub total_monthly: u64,
    pub total_yearly: u64,
    pub accommodation_share_pct: u8,
    pub shares: Vec<CategoryShare>,
}

impl BudgetSummary {
    pub fn chart_slices(&self) -> Vec<ChartSlice> {
        self.shares
            .iter()
            .map(|share| {
                ChartSlice::new(share.label, f64::from(share.amount), share.category.color())
            })
            .collect()
    }

    pub fn donut(&self) -> Result<DonutChart, ChartError> {
        donut(
            &self.chart_slices(),
            Some(self.total_monthly as f64),
            DonutGeometry::default(),
        )
    }
}

fn budget_label(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Education => "Education & Materials",
        other => other.label(),
    }
}

fn share(amount: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        amount as f64 / total as f64 * 100.0
    }
}

/// Leading-digit parse: "250abc" reads as 250, "abc" as 0. Values past
/// `u32::MAX` saturate.
pub fn parse_amount(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail once the string is all digits.
    digits.parse().unwrap_or(u32::MAX)
}
