#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{columns, EventRecord, Row};

/// Everything the registration page needs about one event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Registration {
    pub event: EventRecord,
    pub available_slots: i64,
    pub registration_open: bool,
    pub price: f64,
    pub free: bool,
    pub price_label: String,
    pub access_notice: Option<&'static str>,
    pub payment_notice: Option<&'static str>,
    pub navigation_link: Option<String>,
    pub cancelled: bool,
}

impl From<EventRecord> for Registration {
    fn from(event: EventRecord) -> Self {
        Self {
            available_slots: event.available_slots(),
            registration_open: event.registration_open(),
            price: event.price(),
            free: event.is_free(),
            price_label: event.price_label(),
            access_notice: event.access_notice(),
            payment_notice: event.payment_notice(),
            navigation_link: event.navigation_link().map(str::to_owned),
            cancelled: event.is_cancelled(),
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Registration),
    NotFound,
}

impl Lookup {
    #[must_use]
    pub fn found(self) -> Option<Registration> {
        match self {
            Self::Found(registration) => Some(registration),
            Self::NotFound => None,
        }
    }
}

/// Finds the first row whose Event Id equals `event_id` exactly.
///
/// Date and status are ignored, so past and cancelled events remain
/// locatable; whether to accept sign-ups for them is up to the caller.
pub fn locate(rows: Vec<Row>, event_id: &str) -> Lookup {
    rows.into_iter()
        .find(|row| row.get(columns::EVENT_ID) == Some(event_id))
        .map_or(Lookup::NotFound, |row| {
            Lookup::Found(EventRecord::from(row).into())
        })
}

/// Reads a count the way a lenient integer parse does: an optional sign and
/// the leading decimal digits. Anything without leading digits is zero.
pub(crate) fn parse_count(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);

    let Ok(value) = digits.parse::<i64>() else {
        return 0;
    };

    if raw.starts_with('-') {
        -value
    } else {
        value
    }
}

/// Reads a price from the longest prefix of its leading number-like run
/// (digits, sign, dot, exponent) that parses. Overflowing values count as
/// unparseable and read as zero.
pub(crate) fn parse_price(raw: &str) -> f64 {
    let raw = raw.trim_start();
    let run = raw
        .find(|c: char| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .map_or(raw, |end| &raw[..end]);

    (1..=run.len())
        .rev()
        .find_map(|end| run[..end].parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_rows;

    const SHEET: &str = "\
Event Id,Event Title,Slots,Registered,Price,Level
full,Sold Out Session,10,10,450,Beginner
open,Morning Hatha,10,7,,
oversold,Popular Flow,5,8,0,
blank,,,,,
open,Duplicate Id,99,0,,
";

    fn lookup(id: &str) -> Lookup {
        locate(parse_rows(SHEET), id)
    }

    #[test]
    fn full_event_is_closed() {
        let registration = lookup("full").found().unwrap();

        assert_eq!(registration.available_slots, 0);
        assert!(!registration.registration_open);
        assert_eq!(registration.price, 450.0);
        assert!(!registration.free);
        assert_eq!(registration.price_label, "₹450");
        assert_eq!(registration.event.level(), Some("Beginner"));
    }

    #[test]
    fn open_event_reports_remaining_slots() {
        let registration = lookup("open").found().unwrap();

        assert_eq!(registration.event.title(), Some("Morning Hatha"));
        assert_eq!(registration.available_slots, 3);
        assert!(registration.registration_open);
        assert_eq!(registration.price, 0.0);
        assert!(registration.free);
        assert_eq!(registration.price_label, "Free");
    }

    #[test]
    fn oversold_event_is_closed() {
        let registration = lookup("oversold").found().unwrap();

        assert_eq!(registration.available_slots, -3);
        assert!(!registration.registration_open);
    }

    #[test]
    fn empty_row_is_found_but_unknown_id_is_not() {
        let blank = lookup("blank").found().unwrap();
        assert_eq!(blank.available_slots, 0);
        assert!(!blank.registration_open);

        assert_eq!(lookup("missing"), Lookup::NotFound);
        assert_eq!(lookup("OPEN"), Lookup::NotFound);
        assert_eq!(lookup(" open"), Lookup::NotFound);
    }

    #[test]
    fn missing_price_column_is_free() {
        let rows = parse_rows("Event Id,Slots,Registered\nno-price,10,2");
        let registration = locate(rows, "no-price").found().unwrap();

        assert_eq!(registration.price, 0.0);
        assert!(registration.free);
        assert_eq!(registration.price_label, "Free");
        assert_eq!(registration.payment_notice, None);
        assert_eq!(registration.available_slots, 8);
    }

    #[test]
    fn registration_carries_page_notices() {
        let rows = parse_rows(
            "Event Id,Type,Status,Price,Location Link
online,Virtual,Open for Registration,450,
studio,In Person,Cancelled,,https://maps.example/studio",
        );

        let online = locate(rows.clone(), "online").found().unwrap();
        assert_eq!(
            online.access_notice,
            Some("Event link will be shared after payment.")
        );
        assert_eq!(
            online.payment_notice,
            Some("You will be contacted separately for payment.")
        );
        assert_eq!(online.navigation_link, None);
        assert!(!online.cancelled);

        let studio = locate(rows, "studio").found().unwrap();
        assert_eq!(studio.access_notice, None);
        assert_eq!(studio.payment_notice, None);
        assert_eq!(
            studio.navigation_link.as_deref(),
            Some("https://maps.example/studio")
        );
        assert!(studio.cancelled);
    }

    #[test]
    fn missing_id_column_never_matches() {
        let rows = parse_rows("Event Title\nYoga");
        assert_eq!(locate(rows, ""), Lookup::NotFound);
    }

    #[test]
    fn counts_use_leading_digits() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("12 seats"), 12);
        assert_eq!(parse_count("-4"), -4);
        assert_eq!(parse_count("+4"), 4);
        assert_eq!(parse_count("ten"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("3.9"), 3);
    }

    #[test]
    fn prices_use_longest_numeric_prefix() {
        assert_eq!(parse_price("450"), 450.0);
        assert_eq!(parse_price("450/-"), 450.0);
        assert_eq!(parse_price("99.5 INR"), 99.5);
        assert_eq!(parse_price("₹450"), 0.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("inf"), 0.0);
        assert_eq!(parse_price("1e400"), 0.0);
        assert_eq!(parse_price("1e4x"), 10000.0);
        assert_eq!(parse_price(&"9".repeat(400)), 0.0);
    }
}
