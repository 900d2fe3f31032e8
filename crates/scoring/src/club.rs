use crate::error::{Result, ScoringError};
use crate::parser::ResultRow;

/// One result row of the club of interest, points normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubRow {
    pub discipline: String,
    pub athlete: String,
    pub club: String,
    pub performance: Option<String>,
    pub points: i32,
}

/// Keeps the rows whose club starts with `club_prefix` (case-insensitive)
/// and normalizes their points: absent or blank becomes 0, anything else
/// must be numeric. Order-preserving. A non-numeric points value at this
/// stage is a precondition violation and fails the whole run.
pub fn filter_club(rows: &[ResultRow], club_prefix: &str) -> Result<Vec<ClubRow>> {
    let prefix = club_prefix.to_lowercase();

    rows.iter()
        .filter(|row| row.club.to_lowercase().starts_with(&prefix))
        .map(|row| {
            Ok(ClubRow {
                discipline: row.discipline.clone(),
                athlete: row.athlete.clone(),
                club: row.club.clone(),
                performance: row.performance.clone(),
                points: normalize_points(row)?,
            })
        })
        .collect()
}

fn normalize_points(row: &ResultRow) -> Result<i32> {
    let raw = match row.points.as_deref().map(str::trim) {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };

    if let Ok(points) = raw.parse::<i32>() {
        return Ok(points);
    }

    // Scraped cells sometimes carry an integral float ("950.0").
    if let Ok(points) = raw.parse::<f64>() {
        if points.fract() == 0.0 {
            return Ok(points as i32);
        }
    }

    Err(ScoringError::MalformedRow {
        discipline: row.discipline.clone(),
        athlete: row.athlete.clone(),
        reason: format!("non-numeric points value '{}'", raw),
    })
}
