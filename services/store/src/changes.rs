//! Live change notifications.
//!
//! Every successful mutation publishes a `StoreChange` after commit.
//! Subscribers (the `/changes` SSE stream) re-issue their reads when a
//! change they can see arrives.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::repository::RoleResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreChange {
    Catalog,
    Cart {
        #[serde(rename = "userId")]
        user_id: Uuid,
    },
    Orders {
        #[serde(rename = "userId")]
        user_id: Uuid,
    },
    Admins,
}

impl StoreChange {
    /// SSE event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Cart { .. } => "cart",
            Self::Orders { .. } => "orders",
            Self::Admins => "admins",
        }
    }

    /// Catalog and registry changes are public. Cart changes reach only
    /// their owner; order changes reach their owner and administrators.
    pub fn visible_to(&self, viewer: Option<Uuid>, viewer_is_admin: bool) -> bool {
        match self {
            Self::Catalog | Self::Admins => true,
            Self::Cart { user_id } => viewer == Some(*user_id),
            Self::Orders { user_id } => viewer_is_admin || viewer == Some(*user_id),
        }
    }
}

/// Decides, per change, whether one subscriber may see it.
///
/// Admin-only visibility is checked against the viewer's role at the time
/// each change arrives, so a revoked administrator stops receiving other
/// users' order changes.
pub struct ChangeFilter<G: RoleResolver> {
    pub viewer: Option<Uuid>,
    pub access: G,
}

impl<G: RoleResolver> ChangeFilter<G> {
    pub async fn admits(&self, change: &StoreChange) -> bool {
        if change.visible_to(self.viewer, false) {
            return true;
        }
        if self.viewer.is_none() || !change.visible_to(self.viewer, true) {
            return false;
        }
        match self.access.classify(self.viewer).await {
            Ok(role) => role.is_admin(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event = change.event_name(),
                    "role check failed, change withheld"
                );
                false
            }
        }
    }
}

/// Broadcast hub shared through `AppState`.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<StoreChange>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, change: StoreChange) {
        // Err only means nobody is listening.
        if self.tx.send(change).is_err() {
            tracing::trace!(event = change.event_name(), "no change subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.tx.subscribe()
    }
}
