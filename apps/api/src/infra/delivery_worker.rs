use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::{
    app_error::{AppError, AppResult},
    use_cases::user::{CodeDispatch, CodeSender},
};

pub const QUEUE_CAPACITY: usize = 1024;
const MAX_CONCURRENT_DELIVERIES: usize = 10;
const BASE_BACKOFF: Duration = Duration::from_millis(500);

pub struct DeliveryJob {
    pub destination: String,
    pub code: String,
}

/// Producer side of the delivery queue, handed to the auth use cases.
#[derive(Clone)]
pub struct CodeDispatcher {
    tx: mpsc::Sender<DeliveryJob>,
}

impl CodeDispatcher {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<DeliveryJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl CodeDispatch for CodeDispatcher {
    fn dispatch(&self, destination: String, code: String) -> AppResult<()> {
        self.tx
            .try_send(DeliveryJob { destination, code })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    error!("Code delivery queue is full");
                    AppError::DependencyUnavailable("Code delivery queue is full".into())
                }
                mpsc::error::TrySendError::Closed(_) => {
                    error!("Code delivery worker is not running");
                    AppError::DependencyUnavailable("Code delivery queue is closed".into())
                }
            })
    }
}

/// Consumer side: owns the receiver and the delivery channel.
pub struct DeliveryWorker {
    rx: mpsc::Receiver<DeliveryJob>,
    sender: Arc<dyn CodeSender>,
    max_attempts: u32,
    base_backoff: Duration,
}

impl DeliveryWorker {
    pub fn new(
        rx: mpsc::Receiver<DeliveryJob>,
        sender: Arc<dyn CodeSender>,
        max_attempts: u32,
    ) -> Self {
        Self {
            rx,
            sender,
            max_attempts,
            base_backoff: BASE_BACKOFF,
        }
    }

    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    /// Drain the queue until every dispatcher is dropped, then wait for
    /// in-flight deliveries.
    pub async fn run(mut self) {
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_DELIVERIES));
        let mut in_flight = JoinSet::new();

        info!(
            "Code delivery worker started (max {} attempts, {} concurrent)",
            self.max_attempts, MAX_CONCURRENT_DELIVERIES
        );

        loop {
            tokio::select! {
                job = self.rx.recv() => {
                    let Some(job) = job else { break };
                    let Ok(permit) = semaphore.clone().acquire_owned().await else { break };
                    let sender = Arc::clone(&self.sender);
                    let max_attempts = self.max_attempts;
                    let base_backoff = self.base_backoff;

                    in_flight.spawn(async move {
                        let _permit = permit;
                        deliver_with_retry(sender.as_ref(), &job, max_attempts, base_backoff).await;
                    });
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Code delivery task panicked");
                    }
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Code delivery task panicked");
            }
        }

        info!("Code delivery worker stopped");
    }
}

/// At-least-once delivery: retries with exponential backoff, then gives up
/// and logs. Returns whether the code was handed to the channel.
pub async fn deliver_with_retry(
    sender: &dyn CodeSender,
    job: &DeliveryJob,
    max_attempts: u32,
    base_backoff: Duration,
) -> bool {
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match sender.send(&job.destination, &job.code).await {
            Ok(()) => {
                debug!(destination = %job.destination, attempt, "Code delivered");
                return true;
            }
            Err(e) if attempt < max_attempts => {
                let backoff = base_backoff * 2u32.pow(attempt - 1);
                warn!(
                    destination = %job.destination,
                    attempt,
                    error = %e,
                    "Code delivery failed, retrying in {:?}",
                    backoff
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                error!(
                    destination = %job.destination,
                    attempts = attempt,
                    error = %e,
                    "Code delivery failed, giving up"
                );
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CapturingCodeSender;

    fn job() -> DeliveryJob {
        DeliveryJob {
            destination: "a@x.com".into(),
            code: "123456".into(),
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let sender = CapturingCodeSender::failing_first(2);
        let delivered = deliver_with_retry(&sender, &job(), 3, Duration::from_millis(1)).await;

        assert!(delivered);
        assert_eq!(sender.attempts(), 3);
        assert_eq!(sender.sent(), vec![("a@x.com".into(), "123456".into())]);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let sender = CapturingCodeSender::failing_first(5);
        let delivered = deliver_with_retry(&sender, &job(), 3, Duration::from_millis(1)).await;

        assert!(!delivered);
        assert_eq!(sender.attempts(), 3);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn worker_drains_queue_before_stopping() {
        let sender = Arc::new(CapturingCodeSender::failing_first(1));
        let (dispatcher, rx) = CodeDispatcher::channel(8);
        let worker = DeliveryWorker::new(rx, sender.clone(), 3)
            .with_base_backoff(Duration::from_millis(1));
        let handle = tokio::spawn(worker.run());

        dispatcher.dispatch("a@x.com".into(), "111111".into()).unwrap();
        dispatcher.dispatch("b@x.com".into(), "222222".into()).unwrap();
        drop(dispatcher);
        handle.await.unwrap();

        let mut sent = sender.sent();
        sent.sort();
        assert_eq!(
            sent,
            vec![
                ("a@x.com".into(), "111111".into()),
                ("b@x.com".into(), "222222".into()),
            ]
        );
    }

    #[test]
    fn dispatch_fails_once_worker_is_gone() {
        let (dispatcher, rx) = CodeDispatcher::channel(1);
        drop(rx);
        assert!(matches!(
            dispatcher.dispatch("a@x.com".into(), "123456".into()),
            Err(AppError::DependencyUnavailable(_))
        ));
    }

    #[test]
    fn dispatch_fails_when_queue_is_full() {
        let (dispatcher, _rx) = CodeDispatcher::channel(1);
        dispatcher.dispatch("a@x.com".into(), "1".into()).unwrap();
        assert!(matches!(
            dispatcher.dispatch("b@x.com".into(), "2".into()),
            Err(AppError::DependencyUnavailable(_))
        ));
    }
}
