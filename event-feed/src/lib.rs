mod error;
mod filter;
mod locator;
mod parser;
mod structs;

#[cfg(feature = "fetch")]
mod fetch;
#[cfg(feature = "fetch")]
mod submit;
#[cfg(feature = "fetch")]
mod view;

#[cfg(feature = "ics")]
mod ics;

pub use error::FeedError;
pub use filter::{is_upcoming, resolve_start, upcoming};
pub use locator::{locate, Lookup, Registration};
pub use parser::parse_rows;
pub use structs::{columns, EventKind, EventRecord, EventStatus, ListedEvent, Row};

#[cfg(feature = "fetch")]
pub use fetch::{fetch_csv, fetch_rows, load_registration, load_upcoming};
#[cfg(feature = "fetch")]
pub use submit::FormSink;
#[cfg(feature = "fetch")]
pub use view::{ListingState, RegistrationState, View, ViewState};

#[cfg(feature = "ics")]
pub use self::ics::events_to_ics;
