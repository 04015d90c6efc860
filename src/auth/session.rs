use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sea_orm::DatabaseConnection;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::db::profiles as profile_db;

/// Authentication state changes broadcast to every observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedUp { user_id: Uuid },
    SignedIn { user_id: Uuid },
    SignedOut { user_id: Uuid },
}

impl SessionEvent {
    pub fn user_id(&self) -> Uuid {
        match self {
            SessionEvent::SignedUp { user_id }
            | SessionEvent::SignedIn { user_id }
            | SessionEvent::SignedOut { user_id } => *user_id,
        }
    }
}

pub type SubscriptionId = u64;

/// Registry of session observers.
///
/// Each subscriber gets its own unbounded channel. Dropping the receiver is
/// enough to stop listening; the dead sender is pruned on the next publish.
pub struct SessionHub {
    observers: RwLock<HashMap<SubscriptionId, mpsc::UnboundedSender<SessionEvent>>>,
    next_id: AtomicU64,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHub {
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn subscribe(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.observers.write().await.insert(id, tx);
        (id, rx)
    }

    /// Returns whether the subscription was still registered.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.write().await.remove(&id).is_some()
    }

    /// Deliver `event` to every live observer and return how many received it.
    pub async fn publish(&self, event: SessionEvent) -> usize {
        let mut dead = Vec::new();
        let mut delivered = 0;

        {
            let observers = self.observers.read().await;
            for (id, sender) in observers.iter() {
                if sender.send(event.clone()).is_ok() {
                    delivered += 1;
                } else {
                    dead.push(*id);
                }
            }
        }

        if !dead.is_empty() {
            let mut observers = self.observers.write().await;
            for id in dead {
                observers.remove(&id);
            }
        }

        delivered
    }

    pub async fn observer_count(&self) -> usize {
        self.observers.read().await.len()
    }

    /// Drop every subscription. Observer tasks see their channel close and exit.
    pub async fn teardown(&self) {
        let mut observers = self.observers.write().await;
        let count = observers.len();
        observers.clear();
        tracing::info!("session hub torn down ({count} observers released)");
    }
}

/// Subscribe to `hub`, then run `handle` for every event on a background
/// task. The subscription exists before this returns, so events published
/// right after are not missed.
pub async fn spawn_observer<F, Fut>(hub: &SessionHub, mut handle: F) -> JoinHandle<()>
where
    F: FnMut(SessionEvent) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let (id, mut events) = hub.subscribe().await;
    tracing::debug!("session observer subscribed as {id}");

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            handle(event).await;
        }
        tracing::debug!("session observer {id} stopped");
    })
}

/// Keeps the cached profile in step with sign-ins and sign-outs.
pub async fn spawn_profile_cache_observer(
    hub: &SessionHub,
    db: DatabaseConnection,
    cache: RedisCache,
    ttl: Duration,
) -> JoinHandle<()> {
    spawn_observer(hub, move |event| {
        let db = db.clone();
        let cache = cache.clone();
        async move {
            let key = keys::profile(event.user_id());
            match event {
                SessionEvent::SignedIn { user_id } | SessionEvent::SignedUp { user_id } => {
                    match profile_db::get_profile_bundle(&db, user_id).await {
                        Ok(Some(bundle)) => {
                            if let Err(e) = cache.set(&key, &bundle, ttl).await {
                                tracing::warn!("failed to warm profile cache for {user_id}: {e}");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!("failed to load profile {user_id}: {e}"),
                    }
                }
                SessionEvent::SignedOut { .. } => cache.evict(&key).await,
            }
        }
    })
    .await
}
