use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Settlement state of a prediction. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Pending,
    Won,
    Lost,
}

impl PredictionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Pending => "pending",
            PredictionStatus::Won => "won",
            PredictionStatus::Lost => "lost",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionStatus::Pending)
    }

    /// Terminal status for an evaluated prediction.
    pub fn from_outcome(correct: bool) -> Self {
        if correct {
            PredictionStatus::Won
        } else {
            PredictionStatus::Lost
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prediction status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for PredictionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PredictionStatus::Pending),
            "won" => Ok(PredictionStatus::Won),
            "lost" => Ok(PredictionStatus::Lost),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Database row for the predictions table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub match_date: String,
    pub prediction_type: String,
    pub prediction: String,
    pub status: String,
    pub fixture_id: Option<i64>,
    pub settled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Prediction {
    /// Parsed status. Rows are constrained by a CHECK, so anything else is
    /// treated as still pending.
    pub fn status(&self) -> PredictionStatus {
        self.status.parse().unwrap_or(PredictionStatus::Pending)
    }
}
