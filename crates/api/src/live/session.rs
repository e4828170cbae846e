//! The per-connection event loop.
//!
//! One task per socket multiplexes three sources: client messages, the
//! search debouncer and fetch results. Only one fetch is ever in flight;
//! starting a new one aborts the previous task, and results carrying an
//! older generation are dropped on arrival.

use std::future::Future;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tabula_core::debounce::Debouncer;
use tabula_core::listing::{ListState, Page};
use tabula_db::models::project::ProjectRow;
use tabula_db::repositories::ProjectRepo;
use tabula_db::DbPool;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::component::{Effect, ProjectListComponent};
use super::protocol::{ClientEvent, ServerEvent};
use crate::state::AppState;

const STORE_UNAVAILABLE: &str = "The record store is unavailable. Please try again.";

struct FetchOutcome {
    generation: u64,
    result: Result<Page<ProjectRow>, sqlx::Error>,
}

/// The single in-flight fetch of a session.
#[derive(Default)]
struct FetchSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl FetchSlot {
    fn start(&mut self, pool: &DbPool, state: ListState, tx: &mpsc::Sender<FetchOutcome>) {
        let pool = pool.clone();
        self.spawn(tx, async move { ProjectRepo::list_page(&pool, &state).await });
    }

    /// Supersede whatever is in flight with `fetch`.
    fn spawn<F>(&mut self, tx: &mpsc::Sender<FetchOutcome>, fetch: F)
    where
        F: Future<Output = Result<Page<ProjectRow>, sqlx::Error>> + Send + 'static,
    {
        self.generation += 1;
        if let Some(previous) = self.handle.take() {
            if !previous.is_finished() {
                tracing::debug!(generation = self.generation - 1, "Superseded fetch aborted");
            }
            previous.abort();
        }

        let generation = self.generation;
        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let result = fetch.await;
            // The receiver is gone once the session ended.
            let _ = tx.send(FetchOutcome { generation, result }).await;
        }));
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

type Sink = SplitSink<WebSocket, Message>;

async fn send(sink: &mut Sink, event: &ServerEvent) -> bool {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode live event");
            return false;
        }
    };
    sink.send(Message::Text(json.into())).await.is_ok()
}

/// Drive one live session until the client disconnects.
pub async fn run(socket: WebSocket, app: AppState, initial: ListState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::debug!(conn_id = %conn_id, "Live session connected");

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(4);

    let mut component = ProjectListComponent::new(initial);
    let mut debouncer = Debouncer::new(Duration::from_millis(app.config.name_debounce_ms));
    let mut fetches = FetchSlot::default();
    fetches.start(&app.pool, component.state().clone(), &tx);

    loop {
        tokio::select! {
            message = stream.next() => {
                let text = match message {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::debug!(conn_id = %conn_id, error = %e, "Live session receive error");
                        break;
                    }
                };

                let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        let reply = ServerEvent::error(format!("Unrecognised message: {e}"));
                        if !send(&mut sink, &reply).await {
                            break;
                        }
                        continue;
                    }
                };

                // A quieter search term still queued predates this event.
                if !matches!(event, ClientEvent::SetName { .. } | ClientEvent::ToggleFilters { .. }) {
                    if let Some(name) = debouncer.cancel() {
                        component.set_name(name);
                    }
                }

                match component.apply(event) {
                    Effect::Fetch => fetches.start(&app.pool, component.state().clone(), &tx),
                    Effect::Debounce(name) => debouncer.push(name),
                    Effect::Drawer(open) => {
                        if !send(&mut sink, &ServerEvent::Drawer { open }).await {
                            break;
                        }
                    }
                    Effect::Ignore => {}
                }
            }

            name = debouncer.ready() => {
                component.set_name(name);
                fetches.start(&app.pool, component.state().clone(), &tx);
            }

            Some(outcome) = rx.recv() => {
                if !fetches.is_current(outcome.generation) {
                    tracing::debug!(generation = outcome.generation, "Dropping stale fetch result");
                    continue;
                }

                let reply = match outcome.result {
                    Ok(page) => match component.render(&page, &app.templates) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::error!(error = ?e, "Failed to render live table");
                            ServerEvent::error("An internal error occurred")
                        }
                    },
                    Err(e) => {
                        tracing::error!(conn_id = %conn_id, error = %e, "Live fetch failed");
                        ServerEvent::error(STORE_UNAVAILABLE)
                    }
                };
                if !send(&mut sink, &reply).await {
                    break;
                }
            }
        }
    }

    fetches.cancel();
    tracing::debug!(conn_id = %conn_id, "Live session disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::listing::PAGE_SIZE;

    fn empty_page() -> Result<Page<ProjectRow>, sqlx::Error> {
        Ok(Page {
            items: Vec::new(),
            page: 1,
            page_size: PAGE_SIZE,
            total_count: 0,
        })
    }

    async fn wait_aborted(handle: tokio::task::AbortHandle) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("superseded fetch was not aborted");
    }

    #[tokio::test]
    async fn newer_fetch_aborts_the_one_in_flight() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut slot = FetchSlot::default();

        slot.spawn(&tx, futures::future::pending());
        let first = slot.generation;
        let in_flight = slot.handle.as_ref().unwrap().abort_handle();

        slot.spawn(&tx, async { empty_page() });
        assert_eq!(slot.generation, first + 1);
        assert!(!slot.is_current(first));

        wait_aborted(in_flight).await;
        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.generation, first + 1);
        assert!(slot.is_current(outcome.generation));
    }

    #[tokio::test]
    async fn finished_result_is_stale_once_superseded() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut slot = FetchSlot::default();

        slot.spawn(&tx, async { empty_page() });
        let early = rx.recv().await.unwrap();
        assert!(slot.is_current(early.generation));

        // Delivered but not yet handled when the state changed again.
        slot.spawn(&tx, futures::future::pending());
        assert!(!slot.is_current(early.generation));
    }

    #[tokio::test]
    async fn cancel_aborts_and_empties_the_slot() {
        let (tx, _rx) = mpsc::channel(4);
        let mut slot = FetchSlot::default();

        slot.spawn(&tx, futures::future::pending());
        let in_flight = slot.handle.as_ref().unwrap().abort_handle();
        slot.cancel();

        assert!(slot.handle.is_none());
        wait_aborted(in_flight).await;
    }
}
