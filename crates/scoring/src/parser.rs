use crate::classify::{Family, RELAY_MARKER};

/// Marker the results site puts in the club column of a section header row,
/// e.g. "100m / TCM Finale | directe". Everything before the "|" is the
/// discipline label of the section that follows.
pub const FINAL_MARKER: &str = "Finale";

/// One raw table row as scraped from a results page. All fields are verbatim
/// cell text; nothing is normalized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub discipline: String,
    pub performance: Option<String>,
    pub athlete: String,
    pub club: String,
    pub points: Option<String>,
}

/// One result row with its owning discipline resolved. Points are still raw
/// text; numeric-or-absent is only guaranteed after club extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub discipline: String,
    pub performance: Option<String>,
    pub athlete: String,
    pub club: String,
    pub points: Option<String>,
}

/// Splits the concatenated pages into "Finale" sections and assigns each
/// result row to its discipline.
///
/// Row order within and across pages defines section membership: a section
/// header owns every row up to the next header (or the end of input). Rows
/// before the first header belong to no discipline and are discarded. Relay
/// sections are skipped whole, and measured disciplines (throws, jumps) drop
/// rows without a recorded performance. Input with no header rows produces
/// empty output, not an error.
pub fn parse(pages: &[Vec<RawRow>]) -> Vec<ResultRow> {
    let rows: Vec<&RawRow> = pages.iter().flatten().collect();

    let header_positions: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.club.contains(FINAL_MARKER))
        .map(|(i, _)| i)
        .collect();

    let mut out = Vec::new();

    for (idx, &start) in header_positions.iter().enumerate() {
        let label = section_label(&rows[start].club);

        if label.contains(RELAY_MARKER) {
            continue;
        }

        let end = header_positions
            .get(idx + 1)
            .copied()
            .unwrap_or(rows.len());

        let measured = Family::classify(&label).is_measured();

        for row in &rows[start + 1..end] {
            if measured && !has_performance(row) {
                continue;
            }
            out.push(ResultRow {
                discipline: label.clone(),
                performance: row.performance.clone(),
                athlete: row.athlete.clone(),
                club: row.club.clone(),
                points: row.points.clone(),
            });
        }
    }

    out
}

fn section_label(club_cell: &str) -> String {
    club_cell
        .split('|')
        .next()
        .unwrap_or(club_cell)
        .trim()
        .to_string()
}

fn has_performance(row: &RawRow) -> bool {
    row.performance
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(label: &str) -> RawRow {
        RawRow {
            discipline: label.to_string(),
            performance: None,
            athlete: String::new(),
            club: format!("{} Finale | directe", label),
            points: None,
        }
    }

    fn row(athlete: &str, performance: Option<&str>, points: Option<&str>) -> RawRow {
        RawRow {
            discipline: String::new(),
            performance: performance.map(str::to_string),
            athlete: athlete.to_string(),
            club: "Stade Rennais Athletisme *".to_string(),
            points: points.map(str::to_string),
        }
    }

    #[test]
    fn test_rows_take_their_section_label() {
        let pages = vec![vec![
            header("100m / TCM"),
            row("Alice", Some("11.02"), Some("950")),
            row("Bob", Some("11.45"), Some("890")),
            header("200m / TCF"),
            row("Carol", Some("23.80"), Some("1010")),
        ]];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].discipline, "100m / TCM");
        assert_eq!(parsed[1].discipline, "100m / TCM");
        assert_eq!(parsed[2].discipline, "200m / TCF");
        assert_eq!(parsed[2].athlete, "Carol");
    }

    #[test]
    fn test_sections_span_page_boundaries() {
        let pages = vec![
            vec![
                header("Javelot / TCM"),
                row("Alice", Some("52.10"), Some("700")),
            ],
            vec![
                row("Bob", Some("48.30"), Some("640")),
                header("400m / TCM"),
                row("Carol", Some("49.90"), Some("880")),
            ],
        ];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].discipline, "Javelot / TCM");
        assert_eq!(parsed[1].discipline, "Javelot / TCM");
        assert_eq!(parsed[1].athlete, "Bob");
        assert_eq!(parsed[2].discipline, "400m / TCM");
    }

    #[test]
    fn test_rows_before_first_header_are_discarded() {
        let pages = vec![vec![
            row("Orphan", Some("10.00"), Some("500")),
            header("100m / TCM"),
            row("Alice", Some("11.02"), Some("950")),
        ]];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].athlete, "Alice");
    }

    #[test]
    fn test_relay_sections_are_skipped_whole() {
        let pages = vec![vec![
            header("4 X 100m / TCM"),
            row("Alice", Some("42.00"), Some("900")),
            header("800m / TCF"),
            row("Bob", Some("2:05.1"), Some("870")),
        ]];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].discipline, "800m / TCF");
    }

    #[test]
    fn test_measured_disciplines_drop_missing_performance() {
        let pages = vec![vec![
            header("Hauteur / TCF"),
            row("Alice", Some("1.72"), Some("820")),
            row("NoMark", None, Some("0")),
            row("Blank", Some("   "), Some("0")),
        ]];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].athlete, "Alice");
    }

    #[test]
    fn test_races_keep_missing_performance() {
        let pages = vec![vec![
            header("1500m / TCM"),
            row("Alice", None, Some("600")),
        ]];

        let parsed = parse(&pages);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_no_headers_means_empty_output() {
        let pages = vec![vec![
            row("Alice", Some("11.02"), Some("950")),
            row("Bob", Some("11.45"), Some("890")),
        ]];

        assert!(parse(&pages).is_empty());
        assert!(parse(&[]).is_empty());
    }
}
