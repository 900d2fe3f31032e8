//! Full pipeline run: raw paginated rows through parsing, club extraction,
//! podium building, coefficients and scoring, with no I/O involved.

use chrono::Utc;
use scoring::{RawRow, build_podiums, compute_coefficients, filter_club, leaderboard, parse, score};
use storage::{Prediction, PredictionKind};

const CLUB: &str = "Stade Rennais Athletisme";

fn header(label: &str) -> RawRow {
    RawRow {
        discipline: label.to_string(),
        performance: None,
        athlete: String::new(),
        club: format!("{} Finale | directe", label),
        points: None,
    }
}

fn row(athlete: &str, club: &str, performance: Option<&str>, points: Option<&str>) -> RawRow {
    RawRow {
        discipline: String::new(),
        performance: performance.map(str::to_string),
        athlete: athlete.to_string(),
        club: club.to_string(),
        points: points.map(str::to_string),
    }
}

fn prediction(user: &str, category: &str, kind: PredictionKind, value: &str) -> Prediction {
    Prediction {
        user_id: user.to_string(),
        event_category: category.to_string(),
        kind,
        predicted_value: value.to_string(),
        submitted_at: Utc::now(),
    }
}

/// Two pages of scraped rows: a sprint final split across a page boundary, a
/// measured discipline with an athlete who never recorded a valid attempt, a
/// relay to ignore, and rows from rival clubs.
fn competition_pages() -> Vec<Vec<RawRow>> {
    vec![
        vec![
            row("Stray", "Some Club", Some("9.99"), Some("1200")),
            header("100m / TCM"),
            row("DUPONT Marc", "Stade Rennais Athletisme *", Some("10.92"), Some("950")),
            row("LE GALL Yann", "Entente Quimper", Some("10.95"), Some("940")),
            row("MORIN Theo", "STADE RENNAIS ATHLETISME 2", Some("11.10"), Some("902")),
        ],
        vec![
            row("BRIAND Luc", "Stade Rennais Athletisme *", Some("11.25"), Some("877")),
            header("4 X 100m / TCM"),
            row("Relay Team", "Stade Rennais Athletisme *", Some("41.80"), Some("999")),
            header("Javelot / TCF"),
            row("GICQUEL Solene", "Stade Rennais Athletisme *", Some("48.12"), Some("910")),
            row("NOMARK Eva", "Stade Rennais Athletisme *", None, None),
            row("PETIT Lou", "Stade Rennais Athletisme *", Some("39.05"), Some("760.0")),
        ],
    ]
}

#[test]
fn pipeline_produces_podiums_and_leaderboard() {
    let results = parse(&competition_pages());
    let club_rows = filter_club(&results, CLUB).unwrap();

    // The relay, the rival clubs, the stray pre-header row and the no-mark
    // javelin thrower are all gone.
    assert_eq!(club_rows.len(), 5);
    assert!(club_rows.iter().all(|r| r.athlete != "Relay Team"));
    assert!(club_rows.iter().all(|r| r.athlete != "NOMARK Eva"));

    let podiums = build_podiums(club_rows).unwrap();

    let sprint = podiums.for_category("100m / TCM").unwrap();
    let names: Vec<_> = sprint.entries().iter().map(|r| r.athlete.as_str()).collect();
    assert_eq!(names, ["DUPONT Marc", "MORIN Theo", "BRIAND Luc"]);

    let javelin = podiums.for_category("Javelot / TCF").unwrap();
    assert_eq!(javelin.entries().len(), 2);
    assert_eq!(javelin.entries()[1].points, 760);

    let predictions = vec![
        // Everyone backs Dupont for the win; Alice alone also places Morin.
        prediction("alice", "100m / TCM", PredictionKind::Place1, "Dupont Marc"),
        prediction("alice", "100m / TCM", PredictionKind::Place2, "MORIN THEO"),
        prediction("bob", "100m / TCM", PredictionKind::Place1, "DUPONT Marc"),
        prediction("bob", "100m / TCM", PredictionKind::Place2, "LE GALL Yann"),
        prediction("alice", "Total de points", PredictionKind::TotalPoints, "3400"),
        prediction("bob", "Total de points", PredictionKind::TotalPoints, "5200"),
    ];

    let coefficients = compute_coefficients(&predictions);
    // Dupont: 2 of 4 place predictions -> 50% -> x2.
    assert_eq!(coefficients.get("100m / TCM", "DUPONT Marc"), 2);
    // Morin: 1 of 4 -> 25% -> x4.
    assert_eq!(coefficients.get("100m / TCM", "Morin Theo"), 4);

    let actual_total = Some(3489i64);
    let scores = score(&predictions, &podiums, &coefficients, actual_total);

    // alice: exact 1st (3*2) + exact 2nd (3*4) + total |3489-3400|/500=0 -> 10 = 28.
    assert_eq!(scores["alice"], 28);
    // bob: exact 1st (3*2) + Le Gall not on club podium (0)
    //      + total |3489-5200|/500=3 -> 7 = 13.
    assert_eq!(scores["bob"], 13);

    let ranked = leaderboard(&scores, &predictions, actual_total);
    assert_eq!(ranked[0].user_id, "alice");
    assert_eq!(ranked[0].score, 28);
    assert_eq!(ranked[1].user_id, "bob");
}

#[test]
fn pipeline_is_idempotent() {
    let results = parse(&competition_pages());
    let club_rows = filter_club(&results, CLUB).unwrap();
    let podiums = build_podiums(club_rows.clone()).unwrap();
    let podiums_again = build_podiums(club_rows).unwrap();

    let predictions = vec![prediction(
        "alice",
        "100m / TCM",
        PredictionKind::Place1,
        "DUPONT Marc",
    )];
    let coefficients = compute_coefficients(&predictions);

    let first = score(&predictions, &podiums, &coefficients, None);
    let second = score(&predictions, &podiums_again, &coefficients, None);
    assert_eq!(first, second);
}

#[test]
fn pipeline_with_empty_store_yields_empty_leaderboard() {
    let results = parse(&competition_pages());
    let club_rows = filter_club(&results, CLUB).unwrap();
    let podiums = build_podiums(club_rows).unwrap();

    let coefficients = compute_coefficients(&[]);
    let scores = score(&[], &podiums, &coefficients, Some(3489));
    assert!(scores.is_empty());
    assert!(leaderboard(&scores, &[], Some(3489)).is_empty());
}
