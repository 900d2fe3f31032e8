//! Tailored HTML table extraction for bases.athle.fr results listings.
//! Deliberately naive string scanning, case-insensitive on ASCII tag names;
//! the pages are machine-generated and regular enough that a full HTML
//! parser buys nothing here.

use crate::error::{Result, ScoringError};
use crate::parser::RawRow;

// Column indexes of the results table. The listing carries 17 columns; only
// these five matter to the pipeline.
const COL_DISCIPLINE: usize = 1;
const COL_PERFORMANCE: usize = 2;
const COL_ATHLETE: usize = 4;
const COL_CLUB: usize = 6;
const COL_POINTS: usize = 16;

/// Pulls the raw rows out of one results page, skipping `skip_rows` leading
/// table rows (banner and column headers; the first page carries one more
/// than the rest).
///
/// Section header rows are rendered as a single spanned cell; their text is
/// replicated into the discipline and club fields, matching how the parser
/// expects to find the "Finale" marker.
pub fn extract_rows(html: &str, skip_rows: usize) -> Result<Vec<RawRow>> {
    let table = slice_between_ci(html, "<table", "</table>")
        .ok_or_else(|| ScoringError::ExtractionError("no results table in page".to_string()))?;

    let mut rows = Vec::new();
    let mut pos = 0;
    let mut seen = 0usize;

    while let Some((start, end)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        pos = end;
        seen += 1;
        if seen <= skip_rows {
            continue;
        }

        let cells = extract_cells(&table[start..end]);

        match cells.len() {
            0 => {}
            1 => {
                // Spanned row: a section header like "100m / TCM Finale | directe".
                let text = cells[0].clone();
                rows.push(RawRow {
                    discipline: text.clone(),
                    performance: None,
                    athlete: text.clone(),
                    club: text,
                    points: None,
                });
            }
            n if n > COL_CLUB => {
                rows.push(RawRow {
                    discipline: cell(&cells, COL_DISCIPLINE),
                    performance: opt_cell(&cells, COL_PERFORMANCE),
                    athlete: cell(&cells, COL_ATHLETE),
                    club: cell(&cells, COL_CLUB),
                    points: opt_cell(&cells, COL_POINTS),
                });
            }
            // Decorative spacer rows carry a couple of empty cells.
            _ => {}
        }
    }

    Ok(rows)
}

fn cell(cells: &[String], index: usize) -> String {
    cells.get(index).cloned().unwrap_or_default()
}

fn opt_cell(cells: &[String], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn extract_cells(tr_block: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0;
    while let Some((start, end)) = next_tag_block_ci(tr_block, "<td", "</td>", pos) {
        pos = end;
        let inner = inner_after_open_tag(&tr_block[start..end]);
        cells.push(normalize_ws(&strip_tags(&normalize_entities(&inner))));
    }
    cells
}

/// Content between an opening tag pattern and its closing tag,
/// case-insensitive on ASCII.
fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lowercase_fast(s);
    let open_idx = lc.find(&to_lowercase_fast(open_pat))?;
    let after_open = s[open_idx..].find('>')? + open_idx + 1;
    let close_idx = lc[after_open..].find(&to_lowercase_fast(close_pat))?;
    Some(&s[after_open..after_open + close_idx])
}

/// Byte range of the next complete `<tag ...>...</tag>` block from `from`.
fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lowercase_fast(s);
    let start = lc.get(from..)?.find(&to_lowercase_fast(open_tag))? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&to_lowercase_fast(close_tag))?;
    Some((start, open_end + end_rel + close_tag.len()))
}

fn inner_after_open_tag(block: &str) -> &str {
    let open_end = match block.find('>') {
        Some(i) => i,
        None => return "",
    };
    match block.rfind('<') {
        Some(close_start) if close_start > open_end => &block[open_end + 1..close_start],
        _ => "",
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}
