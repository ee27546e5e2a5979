//! Tests for async task runtime primitives.

use netscore::github::spawn_task;
use netscore::runtime::AsyncTask;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_async_task_spawn_async() {
    let task = AsyncTask::spawn_async(async { 42 });
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_spawn_task_runs_concurrently() {
    let tasks: Vec<_> = (0..7u64).map(|i| spawn_task(async move { i * 2 })).collect();
    let results = futures::future::join_all(tasks).await;
    let doubled: Vec<u64> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(doubled, vec![0, 2, 4, 6, 8, 10, 12]);
}

#[tokio::test]
async fn test_panicking_task_resolves_to_error() {
    let task: AsyncTask<u32> = spawn_task(async { panic!("calculator blew up") });
    assert!(task.await.is_err());
}

#[tokio::test]
async fn test_async_task_from_receiver() {
    let (tx, rx) = oneshot::channel();
    let task = AsyncTask::new(rx);
    tx.send("done").unwrap();
    assert_eq!(task.await.unwrap(), "done");
}
