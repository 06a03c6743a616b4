//! Request executor - runs transports on the tokio runtime without blocking the loop

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::messages::Completion;
use crate::models::Request;
use crate::network::Transport;

/// Spawns one task per dispatch and buffers their completions
pub struct Executor {
    transport: Arc<dyn Transport>,
    runtime: Handle,
    results_tx: mpsc::UnboundedSender<Completion>,
    results_rx: mpsc::UnboundedReceiver<Completion>,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Executor {
            transport,
            runtime,
            results_tx,
            results_rx,
        }
    }

    /// Start executing a snapshot of `request`. The result arrives through [`Executor::collect`].
    pub fn dispatch(&self, request: &Request, id: impl Into<String>) {
        let id = id.into();
        let request = request.clone();
        let transport = Arc::clone(&self.transport);
        let results_tx = self.results_tx.clone();

        self.runtime.spawn(async move {
            tracing::info!(id = %id, url = %request.url, method = ?request.method, "Executing request");
            let outcome = transport.execute(request).await;
            match &outcome {
                Ok(response) => tracing::info!(id = %id, status = response.status, "Request completed"),
                Err(e) => tracing::info!(id = %id, error = %e, "Request failed"),
            }
            let _ = results_tx.send(Completion::new(id, outcome));
        });
    }

    /// Every completion that has arrived so far, oldest first
    pub fn collect(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.results_rx.try_recv() {
            completions.push(completion);
        }
        completions
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::messages::ExecError;
    use crate::models::Response;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Answers 200 with the request URL as body, or fails for URLs containing "fail"
    pub(crate) struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn execute(&self, request: Request) -> Result<Response, ExecError> {
            if request.url.contains("fail") {
                return Err(ExecError::Connect("refused".into()));
            }
            Ok(Response {
                status: 200,
                headers: Vec::new(),
                body: request.url.into_bytes(),
                elapsed_ms: 1,
            })
        }
    }

    /// Holds every request until released
    struct GatedTransport {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn execute(&self, request: Request) -> Result<Response, ExecError> {
            self.gate.notified().await;
            EchoTransport.execute(request).await
        }
    }

    pub(crate) async fn wait_for(executor: &mut Executor, count: usize) -> Vec<Completion> {
        let mut collected = Vec::new();
        for _ in 0..200 {
            collected.extend(executor.collect());
            if collected.len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        collected
    }

    /// Later polls must not hand out anything already delivered
    async fn assert_drained(executor: &mut Executor) {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(2)).await;
            assert!(executor.collect().is_empty());
        }
    }

    #[tokio::test]
    async fn test_collect_never_waits() {
        let gate = Arc::new(Notify::new());
        let mut executor = Executor::new(
            Arc::new(GatedTransport { gate: gate.clone() }),
            Handle::current(),
        );
        executor.dispatch(&Request::new("a").unwrap(), "c/a");
        assert!(executor.collect().is_empty());

        gate.notify_one();
        let done = wait_for(&mut executor, 1).await;
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "c/a");
        assert_drained(&mut executor).await;
    }

    #[tokio::test]
    async fn test_dispatch_uses_snapshot() {
        let mut executor = Executor::new(Arc::new(EchoTransport), Handle::current());
        let mut request = Request::new("a").unwrap();
        request.url = "http://one".into();
        executor.dispatch(&request, "c/a");
        request.url = "http://two".into();

        let done = wait_for(&mut executor, 1).await;
        assert_eq!(done[0].outcome.as_ref().unwrap().body, b"http://one");
    }

    #[tokio::test]
    async fn test_failures_and_duplicate_ids_are_delivered() {
        let mut executor = Executor::new(Arc::new(EchoTransport), Handle::current());
        let mut request = Request::new("a").unwrap();
        executor.dispatch(&request, "c/a");
        request.url = "http://fail".into();
        executor.dispatch(&request, "c/a");

        let done = wait_for(&mut executor, 2).await;
        assert_eq!(done.len(), 2);
        assert!(done.iter().all(|c| c.id == "c/a"));
        assert_eq!(done.iter().filter(|c| c.is_success()).count(), 1);
        assert_drained(&mut executor).await;
    }
}
