use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::{Stream, StreamExt as _};
use tokio::sync::broadcast::error::RecvError;

use shopfront_auth_types::identity::Caller;

use crate::changes::{ChangeFilter, StoreChange};
use crate::state::AppState;

// ── GET /changes ─────────────────────────────────────────────────────────────

/// Server-sent stream of the changes visible to the caller. Clients
/// re-issue their queries on each event.
pub async fn stream_changes(
    caller: Caller,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let filter = ChangeFilter {
        viewer: caller.user_id(),
        access: state.access(),
    };
    let rx = state.changes.subscribe();

    let changes = futures::stream::unfold((rx, filter), |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    if filter.admits(&change).await {
                        return Some((change, (rx, filter)));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "change subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = changes.map(|change: StoreChange| {
        let json = serde_json::to_string(&change).unwrap_or_default();
        Ok(Event::default().event(change.event_name()).data(json))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
