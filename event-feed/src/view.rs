use std::future::Future;

use log::debug;
use reqwest::Client;
use tokio::{
    sync::watch,
    task::{self, JoinHandle},
};

use crate::{load_registration, load_upcoming, EventRecord, Lookup, Registration};

/// State published by a [`View`] while its flow runs.
pub trait ViewState {
    fn is_loading(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    Loaded(Vec<EventRecord>),
}

impl ViewState for ListingState {
    fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationState {
    Loading,
    NotFound,
    Found(Registration),
}

impl ViewState for RegistrationState {
    fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl From<Lookup> for RegistrationState {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Found(registration) => Self::Found(registration),
            Lookup::NotFound => Self::NotFound,
        }
    }
}

/// A flow running in the background on behalf of one consumer.
///
/// The result is only published while the view is alive. Dropping the view
/// aborts the flow, so nothing keeps running or retries after teardown.
pub struct View<S> {
    state: watch::Receiver<S>,
    task: JoinHandle<()>,
}

impl<S> View<S>
where
    S: ViewState + Send + Sync + 'static,
{
    pub(crate) fn spawn<F>(initial: S, load: F) -> Self
    where
        F: Future<Output = S> + Send + 'static,
    {
        let (tx, rx) = watch::channel(initial);

        let task = task::spawn(async move {
            let state = load.await;
            if tx.send(state).is_err() {
                debug!("View was dropped before loading finished, discarding result");
            }
        });

        Self { state: rx, task }
    }

    #[must_use]
    pub fn current(&self) -> watch::Ref<'_, S> {
        self.state.borrow()
    }

    /// Waits for the flow to settle. `None` if the flow died without a result.
    pub async fn loaded(&mut self) -> Option<S>
    where
        S: Clone,
    {
        self.state
            .wait_for(|state| !state.is_loading())
            .await
            .ok()
            .map(|state| state.clone())
    }
}

impl View<ListingState> {
    pub fn listing(client: Client, url: String) -> Self {
        Self::spawn(ListingState::Loading, async move {
            ListingState::Loaded(load_upcoming(&client, &url).await)
        })
    }
}

impl View<RegistrationState> {
    pub fn registration(client: Client, url: String, event_id: String) -> Self {
        Self::spawn(RegistrationState::Loading, async move {
            load_registration(&client, &url, &event_id).await.into()
        })
    }
}

impl<S> Drop for View<S> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
