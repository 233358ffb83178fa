//! Background worker that applies click counter increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Consumes click events until every sender is dropped.
///
/// Increments are best-effort: a failed write is logged at debug level and
/// discarded, never retried and never reported to the redirecting client.
pub async fn run_click_worker<L>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<L>)
where
    L: LinkRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        if let Err(e) = repository.increment_click_count(&event.short_code).await {
            debug!(
                short_code = %event.short_code,
                error = %e,
                "Click count increment failed"
            );
        }
    }

    debug!("Click worker stopped: channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_click_count()
            .withf(|code| code == "abc123")
            .times(2)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_swallows_errors_and_continues() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_click_count()
            .withf(|code| code == "broken")
            .times(1)
            .returning(|_| Err(AppError::unexpected("db down")));
        repo.expect_increment_click_count()
            .withf(|code| code == "fine")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new("broken")).await.unwrap();
        tx.send(ClickEvent::new("fine")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }
}
