use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::{EventRecord, Row};

const ISO_JOINED: [&str; 3] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// Google Sheets publishes en-US times as "10:00:00 AM" by default.
const SPACE_JOINED: [&str; 9] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%d %B %Y %H:%M",
];

const DATE_ONLY: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

/// Resolves the local start of an event from its Date and optional Time cells.
///
/// With a time, `DATE` and `TIME` are first joined with a `T`, then with a
/// space; the first join that parses wins. Without a time the date alone
/// marks the start of that day.
pub fn resolve_start(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let Some(time) = time else {
        return DATE_ONLY
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    };

    let iso = format!("{date}T{time}");
    if let Some(start) = parse_with(&iso, &ISO_JOINED) {
        return Some(start);
    }

    parse_with(&format!("{date} {time}"), &SPACE_JOINED)
}

fn parse_with(s: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Whether the event starts strictly after `now`, read in `now`'s time zone.
///
/// A local time that falls into a DST gap never existed and counts as
/// unparseable; one inside a DST fold resolves to its earlier instant.
pub fn is_upcoming<Tz: TimeZone>(event: &EventRecord, now: &DateTime<Tz>) -> bool {
    event
        .starts_at()
        .and_then(|start| now.timezone().from_local_datetime(&start).earliest())
        .is_some_and(|start| start > *now)
}

/// Keeps the rows whose event is still ahead of `now`, in sheet order.
///
/// Status plays no part here: a cancelled event that has not happened yet is
/// kept so the page can show it as cancelled.
pub fn upcoming<Tz: TimeZone>(rows: Vec<Row>, now: &DateTime<Tz>) -> Vec<EventRecord> {
    rows.into_iter()
        .map(EventRecord::from)
        .filter(|event| is_upcoming(event, now))
        .collect()
}
