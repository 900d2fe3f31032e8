use std::collections::HashMap;

use storage::Prediction;

/// Popularity-inverse multiplier per (event category, athlete), derived from
/// the full prediction set of one scoring run. A safe pick everyone agrees on
/// is worth little; a contrarian correct pick pays out more.
#[derive(Debug, Clone, Default)]
pub struct CoefficientTable {
    table: HashMap<(String, String), u32>,
}

impl CoefficientTable {
    /// Multiplier for an athlete within an event category, defaulting to 1
    /// for pairs that were never predicted.
    pub fn get(&self, event_category: &str, athlete: &str) -> u32 {
        self.table
            .get(&key(event_category, athlete))
            .copied()
            .unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.table
            .iter()
            .map(|((category, athlete), coeff)| (category.as_str(), athlete.as_str(), *coeff))
    }
}

fn key(event_category: &str, athlete: &str) -> (String, String) {
    (
        event_category.trim().to_lowercase(),
        athlete.trim().to_lowercase(),
    )
}

/// Counts how often each athlete appears among the place predictions of each
/// event category and maps the share to a coefficient. Every occurrence
/// counts: the same athlete predicted at two places, or by the same user
/// twice, weighs twice.
pub fn compute_coefficients(predictions: &[Prediction]) -> CoefficientTable {
    let mut counts: HashMap<(String, String), u32> = HashMap::new();
    let mut totals: HashMap<String, u32> = HashMap::new();

    for prediction in predictions {
        if prediction.kind.podium_index().is_none() {
            continue;
        }
        let (category, athlete) = key(&prediction.event_category, &prediction.predicted_value);
        *totals.entry(category.clone()).or_insert(0) += 1;
        *counts.entry((category, athlete)).or_insert(0) += 1;
    }

    let table = counts
        .into_iter()
        .map(|((category, athlete), count)| {
            let total = totals[&category];
            ((category, athlete), coefficient_for(count, total))
        })
        .collect();

    CoefficientTable { table }
}

/// | share of the category's predictions | coefficient |
/// |---|---|
/// | >= 75%     | 1  |
/// | [50%, 75%) | 2  |
/// | [25%, 50%) | 4  |
/// | < 25%      | 10 |
///
/// Band edges are exact: comparisons use cross-multiplication, no floats.
fn coefficient_for(count: u32, total: u32) -> u32 {
    debug_assert!(total >= count && count > 0);
    if count * 4 >= total * 3 {
        1
    } else if count * 2 >= total {
        2
    } else if count * 4 >= total {
        4
    } else {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storage::PredictionKind;

    fn place_prediction(user: &str, category: &str, kind: PredictionKind, athlete: &str) -> Prediction {
        Prediction {
            user_id: user.to_string(),
            event_category: category.to_string(),
            kind,
            predicted_value: athlete.to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(coefficient_for(75, 100), 1);
        assert_eq!(coefficient_for(100, 100), 1);
        assert_eq!(coefficient_for(74, 100), 2);
        assert_eq!(coefficient_for(50, 100), 2);
        assert_eq!(coefficient_for(49, 100), 4);
        assert_eq!(coefficient_for(25, 100), 4);
        assert_eq!(coefficient_for(24, 100), 10);
        assert_eq!(coefficient_for(1, 100), 10);
    }

    #[test]
    fn test_coefficient_is_monotone_in_share() {
        let mut last = u32::MAX;
        for count in 1..=40 {
            let coeff = coefficient_for(count, 40);
            assert!(coeff <= last);
            assert!([1, 2, 4, 10].contains(&coeff));
            last = coeff;
        }
    }

    #[test]
    fn test_counts_every_occurrence_across_places_and_users() {
        // 4 place predictions in the category; "Solene" appears in 3 of them.
        let predictions = vec![
            place_prediction("u1", "Sauts Femme", PredictionKind::Place1, "Solene"),
            place_prediction("u1", "Sauts Femme", PredictionKind::Place2, "solene "),
            place_prediction("u2", "Sauts Femme", PredictionKind::Place1, "SOLENE"),
            place_prediction("u2", "Sauts Femme", PredictionKind::Place2, "Marie"),
        ];

        let table = compute_coefficients(&predictions);
        // 3/4 = 75% -> coefficient 1; 1/4 = 25% -> coefficient 4.
        assert_eq!(table.get("Sauts Femme", "Solene"), 1);
        assert_eq!(table.get("Sauts Femme", "Marie"), 4);
    }

    #[test]
    fn test_categories_are_independent() {
        let predictions = vec![
            place_prediction("u1", "Courses Homme", PredictionKind::Place1, "Paul"),
            place_prediction("u2", "Sauts Homme", PredictionKind::Place1, "Paul"),
            place_prediction("u3", "Sauts Homme", PredictionKind::Place1, "Jean"),
            place_prediction("u4", "Sauts Homme", PredictionKind::Place1, "Jean"),
            place_prediction("u5", "Sauts Homme", PredictionKind::Place1, "Jean"),
        ];

        let table = compute_coefficients(&predictions);
        assert_eq!(table.get("Courses Homme", "Paul"), 1); // 1/1 = 100%
        assert_eq!(table.get("Sauts Homme", "Paul"), 4); // 1/4 = 25%
        assert_eq!(table.get("Sauts Homme", "Jean"), 1); // 3/4 = 75%
    }

    #[test]
    fn test_total_points_predictions_are_ignored() {
        let predictions = vec![
            place_prediction("u1", "Total de points", PredictionKind::TotalPoints, "52000"),
        ];
        let table = compute_coefficients(&predictions);
        assert!(table.is_empty());
        assert_eq!(table.get("Total de points", "52000"), 1);
    }

    #[test]
    fn test_unknown_pairs_default_to_one() {
        let table = compute_coefficients(&[]);
        assert_eq!(table.get("Sauts Femme", "Nobody"), 1);
    }
}
