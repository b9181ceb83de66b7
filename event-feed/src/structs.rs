use std::sync::Arc;

use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::filter::resolve_start;
use crate::locator::{parse_count, parse_price};

/// Column headers of the events spreadsheet.
pub mod columns {
    pub const EVENT_ID: &str = "Event Id";
    pub const EVENT_TITLE: &str = "Event Title";
    pub const DESCRIPTION: &str = "Description";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const DURATION: &str = "Duration(min)";
    pub const LOCATION: &str = "Location";
    pub const LOCATION_ADDRESS: &str = "Location Address";
    pub const LOCATION_LINK: &str = "Location Link";
    pub const TYPE: &str = "Type";
    pub const STATUS: &str = "Status";
    pub const PRICE: &str = "Price";
    pub const SLOTS: &str = "Slots";
    pub const REGISTERED: &str = "Registered";
    pub const LEVEL: &str = "Level";
}

/// One data line of a spreadsheet export, keyed by the header line.
///
/// All rows of a single parse share the same header list. A row always holds
/// exactly one value per header: short lines are padded with empty strings and
/// surplus cells are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    pub(crate) fn new(headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());
        Self { headers, values }
    }

    /// Looks up a cell by header. A repeated header resolves to its right-most column.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|header| header == key)
            .map(|idx| self.values[idx].as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Header/value pairs in header order, skipping columns shadowed by a
    /// repeated header further right.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(idx, header)| {
                self.headers.iter().rposition(|other| other == *header) == Some(*idx)
            })
            .map(|(idx, header)| (header.as_str(), self.values[idx].as_str()))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Virtual,
    InPerson,
    Other(String),
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        match raw {
            "Virtual" => Self::Virtual,
            "In Person" => Self::InPerson,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Free-text status column. Only used for display, never for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Active,
    Cancelled,
    Tentative,
    OpenForRegistration,
    FillingFast,
    LastFewLeft,
    Full,
    Other(String),
}

impl EventStatus {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<&str> for EventStatus {
    fn from(raw: &str) -> Self {
        const KNOWN: [(&str, EventStatus); 8] = [
            ("Active", EventStatus::Active),
            ("Cancelled", EventStatus::Cancelled),
            ("Canceled", EventStatus::Cancelled),
            ("Tentative", EventStatus::Tentative),
            ("Open for Registration", EventStatus::OpenForRegistration),
            ("Filling Fast", EventStatus::FillingFast),
            ("Last Few Left", EventStatus::LastFewLeft),
            ("Full", EventStatus::Full),
        ];

        KNOWN
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map_or_else(|| Self::Other(raw.to_owned()), |(_, status)| status)
    }
}

/// Event-specific reading of a [`Row`]. Nothing is validated up front; every
/// accessor interprets its column on demand and falls back to a neutral value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct EventRecord(Row);

impl From<Row> for EventRecord {
    fn from(row: Row) -> Self {
        Self(row)
    }
}

impl EventRecord {
    fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get(columns::EVENT_ID)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.field(columns::EVENT_TITLE)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.field(columns::DESCRIPTION)
    }

    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.field(columns::DATE)
    }

    #[must_use]
    pub fn time(&self) -> Option<&str> {
        self.field(columns::TIME)
    }

    /// Duration in minutes, if the column holds a positive number.
    #[must_use]
    pub fn duration(&self) -> Option<i64> {
        self.field(columns::DURATION)
            .map(parse_count)
            .filter(|minutes| *minutes > 0)
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.field(columns::LOCATION)
    }

    #[must_use]
    pub fn location_address(&self) -> Option<&str> {
        self.field(columns::LOCATION_ADDRESS)
    }

    #[must_use]
    pub fn location_link(&self) -> Option<&str> {
        self.field(columns::LOCATION_LINK)
    }

    /// The address when the sheet has one, otherwise the location name.
    #[must_use]
    pub fn display_location(&self) -> Option<&str> {
        self.location_address().or_else(|| self.location())
    }

    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        self.field(columns::TYPE).map(EventKind::from)
    }

    #[must_use]
    pub fn status(&self) -> Option<EventStatus> {
        self.field(columns::STATUS).map(EventStatus::from)
    }

    #[must_use]
    pub fn level(&self) -> Option<&str> {
        self.field(columns::LEVEL)
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.field(columns::PRICE).map_or(0.0, parse_price)
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price() == 0.0
    }

    #[must_use]
    pub fn price_label(&self) -> String {
        match self.field(columns::PRICE) {
            Some(raw) if !self.is_free() => format!("₹{raw}"),
            _ => "Free".to_owned(),
        }
    }

    /// How attendees of a virtual event get their joining link.
    #[must_use]
    pub fn access_notice(&self) -> Option<&'static str> {
        if self.kind() != Some(EventKind::Virtual) {
            return None;
        }

        Some(if self.price() > 0.0 {
            "Event link will be shared after payment."
        } else {
            "Event link will be shared separately."
        })
    }

    #[must_use]
    pub fn payment_notice(&self) -> Option<&'static str> {
        (self.price() > 0.0).then_some("You will be contacted separately for payment.")
    }

    /// Map link for an in-person venue. Virtual events never expose one.
    #[must_use]
    pub fn navigation_link(&self) -> Option<&str> {
        match self.kind() {
            Some(EventKind::Virtual) => None,
            _ => self.location_link(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status().is_some_and(|status| status.is_cancelled())
    }

    #[must_use]
    pub fn slots(&self) -> i64 {
        self.field(columns::SLOTS).map_or(0, parse_count)
    }

    #[must_use]
    pub fn registered(&self) -> i64 {
        self.field(columns::REGISTERED).map_or(0, parse_count)
    }

    /// Slots minus registered. May be negative for an oversold event.
    #[must_use]
    pub fn available_slots(&self) -> i64 {
        self.slots().saturating_sub(self.registered())
    }

    #[must_use]
    pub fn registration_open(&self) -> bool {
        self.available_slots() > 0
    }

    /// Local start of the event, `None` when Date is missing or unparseable.
    #[must_use]
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        resolve_start(self.date()?, self.time())
    }
}

/// An upcoming event as the listing page renders it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ListedEvent {
    pub event: EventRecord,
    pub starts_at: Option<NaiveDateTime>,
    pub cancelled: bool,
    pub price_label: String,
    pub access_notice: Option<&'static str>,
    pub navigation_link: Option<String>,
}

impl From<EventRecord> for ListedEvent {
    fn from(event: EventRecord) -> Self {
        Self {
            starts_at: event.starts_at(),
            cancelled: event.is_cancelled(),
            price_label: event.price_label(),
            access_notice: event.access_notice(),
            navigation_link: event.navigation_link().map(str::to_owned),
            event,
        }
    }
}
