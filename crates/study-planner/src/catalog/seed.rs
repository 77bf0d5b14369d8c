use super::domain::{CostBreakdown, Entity, EntityId, EntityKind, QualityRatings};

struct CitySeed {
    id: &'static str,
    name: &'static str,
    country: &'static str,
    currency: &'static str,
    description: &'static str,
    costs: [u32; 6],
    safety: f32,
    student_friendly: f32,
}

// Costs in USD: accommodation, food, transportation, utilities, entertainment, annual tuition.
const CITIES: &[CitySeed] = &[
    CitySeed {
        id: "london",
        name: "London",
        country: "United Kingdom",
        currency: "GBP",
        description: "World-class universities with a high cost of living.",
        costs: [1500, 400, 180, 200, 250, 24000],
        safety: 8.5,
        student_friendly: 9.0,
    },
    CitySeed {
        id: "berlin",
        name: "Berlin",
        country: "Germany",
        currency: "EUR",
        description: "Low or no tuition at public universities and a vibrant culture.",
        costs: [750, 300, 90, 220, 150, 700],
        safety: 8.0,
        student_friendly: 9.5,
    },
    CitySeed {
        id: "paris",
        name: "Paris",
        country: "France",
        currency: "EUR",
        description: "Historic academic institutions and subsidised student housing.",
        costs: [1000, 350, 85, 180, 200, 4000],
        safety: 7.5,
        student_friendly: 8.5,
    },
    CitySeed {
        id: "amsterdam",
        name: "Amsterdam",
        country: "Netherlands",
        currency: "EUR",
        description: "English-taught programmes and a compact, cycle-friendly city.",
        costs: [1100, 380, 100, 190, 180, 12000],
        safety: 9.0,
        student_friendly: 9.0,
    },
    CitySeed {
        id: "munich",
        name: "Munich",
        country: "Germany",
        currency: "EUR",
        description: "Strong engineering schools with tight rental supply.",
        costs: [950, 320, 95, 230, 160, 350],
        safety: 9.5,
        student_friendly: 8.5,
    },
    CitySeed {
        id: "barcelona",
        name: "Barcelona",
        country: "Spain",
        currency: "EUR",
        description: "Mediterranean climate and moderate living costs.",
        costs: [700, 300, 60, 150, 170, 6000],
        safety: 7.5,
        student_friendly: 9.0,
    },
    CitySeed {
        id: "vienna",
        name: "Vienna",
        country: "Austria",
        currency: "EUR",
        description: "Consistently ranked among the most liveable cities.",
        costs: [650, 300, 45, 190, 140, 1500],
        safety: 9.5,
        student_friendly: 8.5,
    },
    CitySeed {
        id: "dublin",
        name: "Dublin",
        country: "Ireland",
        currency: "EUR",
        description: "Tech industry hub with expensive rentals.",
        costs: [1400, 380, 120, 170, 220, 18000],
        safety: 8.0,
        student_friendly: 8.0,
    },
    CitySeed {
        id: "toronto",
        name: "Toronto",
        country: "Canada",
        currency: "CAD",
        description: "Diverse city with post-study work opportunities.",
        costs: [1300, 420, 110, 160, 200, 30000],
        safety: 8.5,
        student_friendly: 8.5,
    },
    CitySeed {
        id: "sydney",
        name: "Sydney",
        country: "Australia",
        currency: "AUD",
        description: "Coastal lifestyle with internationally ranked universities.",
        costs: [1450, 450, 130, 180, 230, 32000],
        safety: 8.5,
        student_friendly: 8.0,
    },
    CitySeed {
        id: "tokyo",
        name: "Tokyo",
        country: "Japan",
        currency: "JPY",
        description: "Safe, efficient, and home to leading research universities.",
        costs: [800, 400, 80, 150, 180, 5500],
        safety: 9.5,
        student_friendly: 8.0,
    },
];

pub(super) fn standard_cities() -> Vec<Entity> {
    CITIES.iter().map(CitySeed::to_entity).collect()
}

impl CitySeed {
    fn to_entity(&self) -> Entity {
        let [accommodation, food, transportation, utilities, entertainment, education] = self.costs;
        Entity {
            id: EntityId::new(self.id),
            kind: EntityKind::City,
            name: self.name.to_string(),
            country: self.country.to_string(),
            currency: self.currency.to_string(),
            description: self.description.to_string(),
            costs: CostBreakdown {
                accommodation,
                food,
                transportation,
                utilities,
                entertainment,
                education,
            },
            quality: QualityRatings {
                safety: self.safety,
                student_friendly: self.student_friendly,
            },
        }
    }
}
