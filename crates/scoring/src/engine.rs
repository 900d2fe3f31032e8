use std::collections::BTreeMap;

use serde::Serialize;
use storage::Prediction;
use tracing::debug;

use crate::coefficients::CoefficientTable;
use crate::podium::PodiumTable;

/// Points for naming the right athlete at the right place.
const EXACT_PLACE_AWARD: i64 = 3;
/// Points for an athlete who is on the podium, at the wrong place.
const ON_PODIUM_AWARD: i64 = 1;
/// Total-points guesses start from this award and lose one point per
/// `TOTAL_POINTS_STEP` of distance from the actual team total.
const TOTAL_POINTS_MAX_AWARD: i64 = 10;
const TOTAL_POINTS_STEP: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub user_id: String,
    pub score: i64,
}

/// Computes the final score of every user that has at least one stored
/// prediction. Pure and order-independent: permuting the prediction list
/// never changes a user's total, and identical inputs give identical output.
pub fn score(
    predictions: &[Prediction],
    podiums: &PodiumTable,
    coefficients: &CoefficientTable,
    total_points_actual: Option<i64>,
) -> BTreeMap<String, i64> {
    let mut scores: BTreeMap<String, i64> = BTreeMap::new();

    for prediction in predictions {
        let award = score_prediction(prediction, podiums, coefficients, total_points_actual);
        debug!(
            user = %prediction.user_id,
            category = %prediction.event_category,
            kind = %prediction.kind,
            award,
            "scored prediction"
        );
        *scores.entry(prediction.user_id.clone()).or_insert(0) += award;
    }

    scores
}

fn score_prediction(
    prediction: &Prediction,
    podiums: &PodiumTable,
    coefficients: &CoefficientTable,
    total_points_actual: Option<i64>,
) -> i64 {
    match prediction.kind.podium_index() {
        Some(index) => score_place_prediction(prediction, index, podiums, coefficients),
        None => score_total_points(prediction, total_points_actual),
    }
}

fn score_place_prediction(
    prediction: &Prediction,
    index: usize,
    podiums: &PodiumTable,
    coefficients: &CoefficientTable,
) -> i64 {
    let Some(podium) = podiums.for_category(&prediction.event_category) else {
        return 0;
    };
    if podium.is_empty() {
        return 0;
    }

    let athlete = prediction.predicted_value.as_str();
    let coefficient = i64::from(coefficients.get(&prediction.event_category, athlete));

    // Exact-place match is exclusive with the on-podium award.
    if podium.athlete_matches_at(index, athlete) {
        EXACT_PLACE_AWARD * coefficient
    } else if podium.contains_athlete(athlete) {
        ON_PODIUM_AWARD * coefficient
    } else {
        0
    }
}

fn score_total_points(prediction: &Prediction, total_points_actual: Option<i64>) -> i64 {
    let Some(actual) = total_points_actual else {
        return 0;
    };
    // A guess that does not parse as an integer is skipped, not an error.
    let Ok(predicted) = prediction.predicted_value.trim().parse::<i64>() else {
        return 0;
    };

    let distance = (actual - predicted).abs() / TOTAL_POINTS_STEP;
    (TOTAL_POINTS_MAX_AWARD - distance).max(0)
}

/// Ranks the scores into a leaderboard. Ties are broken by the closest
/// total-points guess (the published tie-break rule); users without a usable
/// guess rank after those with one at the same score. Remaining ties are
/// ex-aequo and fall back to user id so the output is deterministic.
pub fn leaderboard(
    scores: &BTreeMap<String, i64>,
    predictions: &[Prediction],
    total_points_actual: Option<i64>,
) -> Vec<ScoreEntry> {
    let mut entries: Vec<(ScoreEntry, Option<i64>)> = scores
        .iter()
        .map(|(user_id, &score)| {
            let distance = total_points_distance(user_id, predictions, total_points_actual);
            (
                ScoreEntry {
                    user_id: user_id.clone(),
                    score,
                },
                distance,
            )
        })
        .collect();

    entries.sort_by(|(a, da), (b, db)| {
        b.score
            .cmp(&a.score)
            .then_with(|| match (da, db) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries.into_iter().map(|(entry, _)| entry).collect()
}

fn total_points_distance(
    user_id: &str,
    predictions: &[Prediction],
    total_points_actual: Option<i64>,
) -> Option<i64> {
    let actual = total_points_actual?;
    predictions
        .iter()
        .filter(|p| p.user_id == user_id && p.kind.podium_index().is_none())
        .filter_map(|p| p.predicted_value.trim().parse::<i64>().ok())
        .map(|predicted| (actual - predicted).abs())
        .min()
}
