use bankhub::{Error, ToastKind, ToastQueue};
use std::time::Duration;

fn messages(queue: &ToastQueue) -> Vec<&str> {
    queue.toasts().iter().map(|t| t.message.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_each_toast_lives_for_its_own_duration() {
    let mut queue = ToastQueue::with_default_duration(Duration::from_millis(3500));

    queue.show("A", ToastKind::Info);
    tokio::time::sleep(Duration::from_millis(1000)).await;
    queue.show("B", ToastKind::Success);
    tokio::time::sleep(Duration::from_millis(1000)).await;
    queue.show("C", ToastKind::Error);
    assert_eq!(messages(&queue), vec!["A", "B", "C"]);

    // t = 3.6s: only A has expired
    tokio::time::sleep(Duration::from_millis(1600)).await;
    queue.process_pending();
    assert_eq!(messages(&queue), vec!["B", "C"]);

    // t = 4.6s
    tokio::time::sleep(Duration::from_millis(1000)).await;
    queue.process_pending();
    assert_eq!(messages(&queue), vec!["C"]);

    // t = 5.6s
    tokio::time::sleep(Duration::from_millis(1000)).await;
    queue.process_pending();
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_toaster_custom_duration() {
    let mut queue = ToastQueue::new();
    let toaster = queue.toaster();

    toaster
        .show_for("court", ToastKind::Info, Duration::from_millis(200))
        .unwrap();
    toaster.error("long").unwrap();
    queue.process_pending();
    assert_eq!(messages(&queue), vec!["court", "long"]);

    tokio::time::sleep(Duration::from_millis(300)).await;
    queue.process_pending();
    assert_eq!(messages(&queue), vec!["long"]);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_after_manual_dismiss_is_noop() {
    let mut queue = ToastQueue::new();
    let first = queue.enqueue("x", ToastKind::Info, Duration::from_millis(100));
    let second = queue.enqueue("y", ToastKind::Info, Duration::from_millis(100));
    assert!(queue.dismiss(first));

    tokio::time::sleep(Duration::from_millis(200)).await;
    queue.process_pending();
    assert!(queue.is_empty());
    assert!(!queue.dismiss(second));
}

#[tokio::test]
async fn test_toaster_outlives_queue() {
    let queue = ToastQueue::new();
    let toaster = queue.toaster();
    drop(queue);

    assert!(!toaster.is_live());
    assert!(matches!(
        toaster.info("perdu"),
        Err(Error::ToastUnavailable)
    ));
}
