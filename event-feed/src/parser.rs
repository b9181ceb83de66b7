use std::mem;
use std::sync::Arc;

use crate::Row;

/// Parses a spreadsheet CSV export into rows keyed by its first line.
///
/// Blank lines are skipped. The header line is split on bare commas; data
/// lines go through [`split_fields`], which honours double-quoted cells.
/// Every physical line is one record, so quoted cells cannot span lines.
pub fn parse_rows<S: AsRef<str>>(s: S) -> Vec<Row> {
    let mut lines = s.as_ref().lines().filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers = header_line
        .split(',')
        .map(parse_header)
        .collect::<Arc<[String]>>();

    lines
        .map(|line| Row::new(Arc::clone(&headers), split_fields(line)))
        .collect()
}

fn parse_header(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim()
        .to_owned()
}

/// Splits one line on commas outside of double quotes. Quote characters only
/// toggle quoting and never end up in a cell.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(finish_field(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(finish_field(&mut current));
    fields
}

fn finish_field(current: &mut String) -> String {
    mem::take(current).trim().to_owned()
}
