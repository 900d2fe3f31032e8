use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The closed set of prediction kinds the game accepts.
///
/// The wire strings ("Place 1", "Total Points", ...) are the values stored in
/// the `prediction_type` column; rows carrying anything else are dropped at
/// the repository boundary so downstream matching stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionKind {
    Place1,
    Place2,
    Place3,
    TotalPoints,
}

impl PredictionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Place1 => "Place 1",
            Self::Place2 => "Place 2",
            Self::Place3 => "Place 3",
            Self::TotalPoints => "Total Points",
        }
    }

    pub fn all() -> &'static [PredictionKind] {
        &[
            Self::Place1,
            Self::Place2,
            Self::Place3,
            Self::TotalPoints,
        ]
    }

    /// Zero-based podium index for place predictions, `None` for the
    /// total-points question.
    pub fn podium_index(&self) -> Option<usize> {
        match self {
            Self::Place1 => Some(0),
            Self::Place2 => Some(1),
            Self::Place3 => Some(2),
            Self::TotalPoints => None,
        }
    }

    fn parse_str(s: &str) -> Result<Self, UnknownPredictionKind> {
        match s.trim() {
            "Place 1" => Ok(Self::Place1),
            "Place 2" => Ok(Self::Place2),
            "Place 3" => Ok(Self::Place3),
            "Total Points" => Ok(Self::TotalPoints),
            other => Err(UnknownPredictionKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPredictionKind(pub String);

impl std::fmt::Display for UnknownPredictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown prediction type: '{}'", self.0)
    }
}

impl std::error::Error for UnknownPredictionKind {}

impl TryFrom<&str> for PredictionKind {
    type Error = UnknownPredictionKind;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for PredictionKind {
    type Err = UnknownPredictionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stored prediction row, as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub user_id: String,
    pub event_category: String,
    pub kind: PredictionKind,
    pub predicted_value: String,
    pub submitted_at: DateTime<Utc>,
}

/// Raw database row; the `prediction_type` column is decoded into
/// [`PredictionKind`] by the repository.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct PredictionRow {
    pub user_name: String,
    pub event_category: String,
    pub prediction_type: String,
    pub predicted_value: String,
    pub submission_timestamp: DateTime<Utc>,
}

impl PredictionRow {
    pub(crate) fn into_prediction(self) -> Result<Prediction, UnknownPredictionKind> {
        let kind = self.prediction_type.parse()?;
        Ok(Prediction {
            user_id: self.user_name,
            event_category: self.event_category,
            kind,
            predicted_value: self.predicted_value,
            submitted_at: self.submission_timestamp,
        })
    }
}
