use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A synthetic financial/personal profile produced by the backend.
///
/// The client treats every field as opaque input: it renders them and echoes
/// them back verbatim when a rating is submitted. Currency fields are whole
/// dollars; the `/10` fields are conventionally 0–10 but the client does not
/// re-validate what the backend sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_type: String,
    pub description: String,
    pub savings_amount: i64,
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub monthly_entertainment: i64,
    pub sales_skills: u8,
    pub risk_level: u8,
    pub age: u8,
    pub dependents: u8,
    pub assets: i64,
    pub confidence: u8,
    pub difficulty: u8,
}

/// Payload posted to `/submit_rating`: the scenario's fields flattened, plus
/// the human-assigned readiness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSubmission {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub entrepreneurial_readiness_score: u8,
}

impl RatingSubmission {
    pub fn new(scenario: Scenario, score: u8) -> Self {
        Self {
            scenario,
            entrepreneurial_readiness_score: score,
        }
    }
}

/// One entry of the in-memory session log. Appended when the user moves on
/// from a scenario that had a draft score, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub scenario: Scenario,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of the monotonic session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub completed_scenarios: u32,
    pub distinct_scenario_types: u32,
}
