use chrono::Local;
use log::{debug, warn};
use reqwest::Client;

use crate::{locate, parse_rows, upcoming, EventRecord, FeedError, Lookup, Row};

/// Downloads a published spreadsheet as CSV text. One attempt, no timeout.
pub async fn fetch_csv(client: &Client, url: &str) -> Result<String, FeedError> {
    debug!("Fetching sheet from {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FeedError::Request {
            url: url.to_owned(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FeedError::Body {
        url: url.to_owned(),
        source,
    })
}

pub async fn fetch_rows(client: &Client, url: &str) -> Result<Vec<Row>, FeedError> {
    let rows = parse_rows(fetch_csv(client, url).await?);
    debug!("Parsed {} rows from {url}", rows.len());
    Ok(rows)
}

/// Listing flow: the upcoming events of the sheet at `url`, compared against
/// the local clock once the sheet has been parsed. A failed fetch yields no
/// events.
pub async fn load_upcoming(client: &Client, url: &str) -> Vec<EventRecord> {
    match fetch_rows(client, url).await {
        Ok(rows) => upcoming(rows, &Local::now()),
        Err(err) => {
            warn!("Showing no events: {err}");
            Vec::new()
        }
    }
}

/// Registration flow: the event with `event_id` in the sheet at `url`. A
/// failed fetch is reported the same way as an unknown id.
pub async fn load_registration(client: &Client, url: &str, event_id: &str) -> Lookup {
    match fetch_rows(client, url).await {
        Ok(rows) => locate(rows, event_id),
        Err(err) => {
            warn!("Cannot look up event {event_id}: {err}");
            Lookup::NotFound
        }
    }
}
