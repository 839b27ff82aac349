//! Tests for async task runtime primitives.

use netscore::runtime::AsyncTask;

#[tokio::test]
async fn test_async_task_spawn() {
    let task = AsyncTask::spawn(|| 42);
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_async_task_spawn_async() {
    let task = AsyncTask::spawn_async(async { 42 });
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_async_task_ready() {
    let task = AsyncTask::ready("done");
    assert_eq!(task.await.unwrap(), "done");
}

#[tokio::test]
async fn test_dropped_sender_is_error() {
    let (tx, rx) = tokio::sync::oneshot::channel::<u32>();
    drop(tx);
    assert!(AsyncTask::new(rx).await.is_err());
}

#[tokio::test]
async fn test_panicking_worker_is_error() {
    let task = AsyncTask::spawn_async(async {
        let values: Vec<u32> = Vec::new();
        values[0]
    });
    assert!(task.await.is_err());
}
