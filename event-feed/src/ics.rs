use chrono::Duration;
use ics::{
    escape_text,
    properties::{Description, DtEnd, DtStart, Location, Status, Summary},
    ICalendar,
};

use crate::{EventRecord, EventStatus};

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";

/// Builds a calendar of the given events. Events without a resolvable start
/// are left out. Times are floating, i.e. read in the subscriber's zone.
#[must_use]
pub fn events_to_ics<'a>(name: &'a str, events: &'a [EventRecord]) -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", name);

    for event in events {
        if let Some(ics_event) = event.to_ics() {
            icalendar.add_event(ics_event);
        }
    }

    icalendar
}

impl EventRecord {
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let starts_at = self.starts_at()?;
        let start = starts_at.format(ICS_DATETIME).to_string();

        let title = self.title().unwrap_or("Event");
        let id = match self.id() {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => format!("{}_{}", start, title.replace(' ', "-")),
        };

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(Summary::new(escape_text(title)));

        if let Some(end) = self
            .duration()
            .and_then(Duration::try_minutes)
            .and_then(|duration| starts_at.checked_add_signed(duration))
        {
            ics_event.push(DtEnd::new(end.format(ICS_DATETIME).to_string()));
        }

        if let Some(location) = self.display_location() {
            ics_event.push(Location::new(escape_text(location)));
        }

        if let Some(description) = self.description() {
            ics_event.push(Description::new(escape_text(description)));
        }

        ics_event.push(match self.status() {
            Some(EventStatus::Cancelled) => Status::cancelled(),
            Some(EventStatus::Tentative) => Status::tentative(),
            _ => Status::confirmed(),
        });

        Some(ics_event)
    }
}
