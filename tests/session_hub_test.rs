use tokio::sync::mpsc;
use uuid::Uuid;

use freelancebot_backend::auth::session::{SessionEvent, SessionHub, spawn_observer};

#[tokio::test]
async fn test_every_subscriber_receives_published_events() {
    let hub = SessionHub::new();
    let (_, mut first) = hub.subscribe().await;
    let (_, mut second) = hub.subscribe().await;

    let user_id = Uuid::new_v4();
    let delivered = hub.publish(SessionEvent::SignedIn { user_id }).await;

    assert_eq!(delivered, 2);
    assert_eq!(first.recv().await, Some(SessionEvent::SignedIn { user_id }));
    assert_eq!(second.recv().await, Some(SessionEvent::SignedIn { user_id }));
}

#[tokio::test]
async fn test_unsubscribe_stops_delivery() {
    let hub = SessionHub::new();
    let (id, mut events) = hub.subscribe().await;

    assert!(hub.unsubscribe(id).await);
    assert!(!hub.unsubscribe(id).await);
    assert_eq!(hub.observer_count().await, 0);

    let delivered = hub
        .publish(SessionEvent::SignedOut {
            user_id: Uuid::new_v4(),
        })
        .await;
    assert_eq!(delivered, 0);
    // The sender was dropped with the registration, so the channel is closed.
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn test_dropped_receivers_are_pruned_on_publish() {
    let hub = SessionHub::new();
    let (_, events) = hub.subscribe().await;
    let (_, mut kept) = hub.subscribe().await;
    drop(events);

    let user_id = Uuid::new_v4();
    let delivered = hub.publish(SessionEvent::SignedUp { user_id }).await;

    assert_eq!(delivered, 1);
    assert_eq!(hub.observer_count().await, 1);
    assert_eq!(kept.recv().await.map(|e| e.user_id()), Some(user_id));
}

#[tokio::test]
async fn test_teardown_closes_every_channel() {
    let hub = SessionHub::new();
    let (_, mut a) = hub.subscribe().await;
    let (_, mut b) = hub.subscribe().await;

    hub.teardown().await;

    assert_eq!(hub.observer_count().await, 0);
    assert_eq!(a.recv().await, None);
    assert_eq!(b.recv().await, None);
}

#[tokio::test]
async fn test_observer_is_subscribed_before_its_task_runs() {
    let hub = SessionHub::new();
    let (seen_tx, mut seen) = mpsc::unbounded_channel();

    let task = spawn_observer(&hub, move |event| {
        let seen_tx = seen_tx.clone();
        async move {
            let _ = seen_tx.send(event);
        }
    })
    .await;

    // The single-threaded test runtime has not polled the task yet.
    assert_eq!(hub.observer_count().await, 1);

    let user_id = Uuid::new_v4();
    let delivered = hub.publish(SessionEvent::SignedIn { user_id }).await;
    assert_eq!(delivered, 1);
    assert_eq!(seen.recv().await, Some(SessionEvent::SignedIn { user_id }));

    hub.teardown().await;
    task.await.unwrap();
}
