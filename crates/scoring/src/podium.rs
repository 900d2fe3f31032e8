use std::collections::BTreeMap;

use crate::classify::{Family, Gender};
use crate::club::ClubRow;
use crate::error::{Result, ScoringError};

/// Normalized discipline identity: the exact event plus its derived gender
/// and family. Scoring lookups compare against the full label; the family is
/// only a display grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discipline {
    pub label: String,
    pub event: String,
    pub gender: Gender,
    pub family: Family,
}

impl Discipline {
    /// None when the label's gender segment does not follow the upstream
    /// "Event / TCx" shape.
    pub fn from_label(label: &str) -> Option<Discipline> {
        let gender = Gender::from_label(label)?;
        let event = label.split('/').next().unwrap_or("").trim().to_string();
        Some(Discipline {
            label: label.trim().to_string(),
            event: event.clone(),
            gender,
            family: Family::classify(&event),
        })
    }

    fn same_event(&self, other: &Discipline) -> bool {
        self.gender == other.gender && self.event.eq_ignore_ascii_case(&other.event)
    }
}

/// Ranked top results for one discipline, at most three entries, points
/// non-increasing. Ties stay in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Podium {
    entries: Vec<ClubRow>,
}

pub const PODIUM_SIZE: usize = 3;

impl Podium {
    fn push_capped(&mut self, row: ClubRow) {
        if self.entries.len() < PODIUM_SIZE {
            self.entries.push(row);
        }
    }

    pub fn entries(&self) -> &[ClubRow] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the athlete at `index` matches `name`, case-insensitive and
    /// whitespace-trimmed.
    pub fn athlete_matches_at(&self, index: usize, name: &str) -> bool {
        self.entries
            .get(index)
            .is_some_and(|row| names_match(&row.athlete, name))
    }

    pub fn contains_athlete(&self, name: &str) -> bool {
        self.entries.iter().any(|row| names_match(&row.athlete, name))
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Podiums of one scoring run: the exact per-discipline table used for
/// scoring plus a coarser per-family view for display.
#[derive(Debug, Clone, Default)]
pub struct PodiumTable {
    podiums: Vec<(Discipline, Podium)>,
    family_podiums: BTreeMap<(Gender, Family), Podium>,
}

impl PodiumTable {
    /// The podium a prediction's event category refers to. Matching is
    /// against the discipline label, case-insensitive and trimmed.
    pub fn for_category(&self, category: &str) -> Option<&Podium> {
        let wanted = category.trim();
        self.podiums
            .iter()
            .find(|(discipline, _)| discipline.label.eq_ignore_ascii_case(wanted))
            .map(|(_, podium)| podium)
    }

    pub fn disciplines(&self) -> impl Iterator<Item = (&Discipline, &Podium)> {
        self.podiums.iter().map(|(d, p)| (d, p))
    }

    /// Display-only grouping; never consulted by scoring.
    pub fn by_family(&self) -> &BTreeMap<(Gender, Family), Podium> {
        &self.family_podiums
    }

    pub fn len(&self) -> usize {
        self.podiums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.podiums.is_empty()
    }
}

/// Groups club rows into podiums. Rows are stable-sorted by points
/// descending, then grouped by exact (event, gender); the family view is
/// built from the same ordering. A row whose label hides the gender segment
/// is a precondition violation.
pub fn build_podiums(rows: Vec<ClubRow>) -> Result<PodiumTable> {
    let mut keyed: Vec<(Discipline, ClubRow)> = rows
        .into_iter()
        .map(|row| {
            let discipline = Discipline::from_label(&row.discipline).ok_or_else(|| {
                ScoringError::MalformedRow {
                    discipline: row.discipline.clone(),
                    athlete: row.athlete.clone(),
                    reason: "unreadable gender segment in discipline label".to_string(),
                }
            })?;
            Ok((discipline, row))
        })
        .collect::<Result<_>>()?;

    keyed.sort_by_key(|(_, row)| std::cmp::Reverse(row.points));

    let mut table = PodiumTable::default();

    for (discipline, row) in keyed {
        table
            .family_podiums
            .entry((discipline.gender, discipline.family))
            .or_default()
            .push_capped(row.clone());

        match table
            .podiums
            .iter_mut()
            .find(|(d, _)| d.same_event(&discipline))
        {
            Some((_, podium)) => podium.push_capped(row),
            None => {
                let mut podium = Podium::default();
                podium.push_capped(row);
                table.podiums.push((discipline, podium));
            }
        }
    }

    Ok(table)
}
