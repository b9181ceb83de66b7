use std::{collections::HashMap, env, io, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use event_feed::{
    events_to_ics, FeedError, FormSink, ListedEvent, ListingState, RegistrationState, View,
};
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use tokio::{net::TcpListener, signal};

mod cli;

const CALENDAR_NAME: &str = "YogicAmrita Events";

struct AppState {
    client: Client,
    events_url: String,
    registration_url: String,
    contact: FormSink,
}

type Shared = Arc<AppState>;

#[tokio::main]
async fn main() -> io::Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());
    let addr = args.address;

    let state = AppState {
        client: Client::new(),
        events_url: args.events_url,
        registration_url: args.registration_url,
        contact: FormSink::new(args.contact_form_url)
            .field("name", "entry.2005620554")
            .field("email", "entry.1045781291")
            .field("phone", "entry.1166974658")
            .field("message", "entry.839337160"),
    };

    let router = Router::new()
        .route("/events", get(handle_events))
        .route("/register/:event_id", get(handle_registration))
        .route("/contact", post(handle_contact))
        .with_state(Arc::new(state));

    let listener = TcpListener::bind(addr).await?;
    info!("Listening at http://{addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "event_feed=info,event_feed_proxy=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {err}");
        return;
    }
    info!("Shutting down");
}

#[derive(Deserialize)]
struct EventsQuery {
    #[serde(default)]
    json: bool,
}

// Each handler owns its view, so a client hanging up drops the view and
// aborts the upstream fetch with it.

async fn handle_events(State(state): State<Shared>, Query(query): Query<EventsQuery>) -> Response {
    let mut view = View::listing(state.client.clone(), state.events_url.clone());

    let events = match view.loaded().await {
        Some(ListingState::Loaded(events)) => events,
        _ => Vec::new(),
    };

    if query.json {
        let listed = events.into_iter().map(ListedEvent::from).collect::<Vec<_>>();
        return Json(listed).into_response();
    }

    (
        [("content-type", "text/calendar")],
        events_to_ics(CALENDAR_NAME, &events).to_string(),
    )
        .into_response()
}

async fn handle_registration(
    State(state): State<Shared>,
    Path(event_id): Path<String>,
) -> Response {
    let mut view = View::registration(
        state.client.clone(),
        state.registration_url.clone(),
        event_id,
    );

    match view.loaded().await {
        Some(RegistrationState::Found(registration)) => Json(registration).into_response(),
        _ => (StatusCode::NOT_FOUND, "Event not found.").into_response(),
    }
}

async fn handle_contact(
    State(state): State<Shared>,
    Form(values): Form<HashMap<String, String>>,
) -> Response {
    match state.contact.submit(&state.client, &values).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err @ FeedError::MissingField(_)) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err) => {
            warn!("Failed to forward contact submission: {err}");
            (StatusCode::BAD_GATEWAY, "Failed to forward submission").into_response()
        }
    }
}
