use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JourneyProfileId(pub u64);

impl fmt::Display for JourneyProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client payload for creating or replacing a journey profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyProfileDraft {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub destination_country: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub intended_start_date: Option<NaiveDate>,
}

impl JourneyProfileDraft {
    /// Field names that are blank or missing, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full_name");
        }
        if self.destination_country.trim().is_empty() {
            missing.push("destination_country");
        }
        if self.intended_start_date.is_none() {
            missing.push("intended_start_date");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyProfile {
    pub id: JourneyProfileId,
    pub full_name: String,
    pub destination_country: String,
    pub intended_start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Blank strings and unparseable dates both read as "not provided".
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()))
}
