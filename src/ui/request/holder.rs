use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::gemini::{GenerateError, Generator};
use crate::media::EncodedImage;
use crate::ui::mvi::Reducer;

use super::intent::RequestIntent;
use super::reducer::RequestReducer;
use super::state::RequestOutcome;

/// Why a submission was not started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A request is already in progress")]
    Busy,
}

type SettledHook = Arc<dyn Fn() + Send + Sync>;

/// Owns the request outcome and runs generation requests.
///
/// The outcome is published through a `watch` channel: the holder writes
/// `Loading` on submit, the request task writes the terminal state, and the
/// screen only reads snapshots. One request at a time; overlapping submits
/// are refused with [`SubmitError::Busy`].
pub struct RequestHolder {
    outcome: Arc<watch::Sender<RequestOutcome>>,
    generator: Arc<dyn Generator>,
    runtime: Handle,
    timeout: Duration,
    next_request_id: u64,
    in_flight: Option<JoinHandle<()>>,
    on_settled: Option<SettledHook>,
}

impl RequestHolder {
    pub fn new(generator: Arc<dyn Generator>, runtime: Handle, timeout: Duration) -> Self {
        let (outcome, _) = watch::channel(RequestOutcome::default());
        Self {
            outcome: Arc::new(outcome),
            generator,
            runtime,
            timeout,
            next_request_id: 0,
            in_flight: None,
            on_settled: None,
        }
    }

    /// Called from the request task after the terminal state is published.
    pub fn set_on_settled<F>(&mut self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_settled = Some(Arc::new(hook));
    }

    /// Snapshot of the current outcome.
    pub fn outcome(&self) -> RequestOutcome {
        self.outcome.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestOutcome> {
        self.outcome.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.borrow().is_loading()
    }

    /// Start a request. The outcome is `Loading` when this returns `Ok`.
    pub fn submit(&mut self, image: EncodedImage, prompt: String) -> Result<u64, SubmitError> {
        if self.is_loading() {
            return Err(SubmitError::Busy);
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.outcome.send_modify(|state| {
            RequestReducer::reduce_in_place(state, RequestIntent::Submit { request_id })
        });
        tracing::info!(request_id, prompt_chars = prompt.chars().count(), "Request submitted");

        let outcome = Arc::clone(&self.outcome);
        let generator = Arc::clone(&self.generator);
        let on_settled = self.on_settled.clone();
        let timeout = self.timeout;

        let task = self.runtime.spawn(async move {
            let started = Instant::now();
            // Run the call in its own task so a panicking generator still settles the outcome.
            let mut call = AbortOnDrop(tokio::spawn(async move {
                generator.generate(&image, &prompt).await
            }));
            let result = match tokio::time::timeout(timeout, &mut call.0).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(GenerateError::Internal(join_failure(join_err))),
                Err(_) => Err(GenerateError::Timeout {
                    seconds: timeout.as_secs(),
                }),
            };

            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &result {
                Ok(text) => {
                    tracing::info!(request_id, elapsed_ms, chars = text.chars().count(), "Request succeeded")
                }
                Err(err) => tracing::warn!(
                    request_id,
                    elapsed_ms,
                    kind = err.kind(),
                    "Request failed: {}",
                    err
                ),
            }

            let result = result.map_err(|err| err.to_string());
            outcome.send_modify(|state| {
                RequestReducer::reduce_in_place(state, RequestIntent::Completed { request_id, result })
            });
            if let Some(hook) = on_settled {
                hook();
            }
        });
        self.in_flight = Some(task);

        Ok(request_id)
    }
}

/// Aborts the wrapped task when dropped, e.g. on timeout or when the outer
/// request task is itself aborted.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return "request was cancelled".to_string();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "generator panicked".to_string())
}

impl Drop for RequestHolder {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::MockGenerator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn image() -> EncodedImage {
        EncodedImage {
            mime_type: "image/png",
            bytes: Arc::from(vec![0x89, 0x50, 0x4E, 0x47]),
        }
    }

    fn holder(generator: MockGenerator, timeout: Duration) -> RequestHolder {
        RequestHolder::new(Arc::new(generator), Handle::current(), timeout)
    }

    async fn settle(rx: &mut watch::Receiver<RequestOutcome>) -> RequestOutcome {
        let wait = async {
            loop {
                let current = rx.borrow_and_update().clone();
                if current.is_terminal() {
                    return current;
                }
                rx.changed().await.expect("holder dropped");
            }
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("request never settled")
    }

    #[tokio::test]
    async fn loading_then_success() {
        let mut holder = holder(
            MockGenerator::new().with_text("A chocolate cake."),
            Duration::from_secs(5),
        );
        let mut rx = holder.subscribe();

        let id = holder.submit(image(), "describe this".into()).unwrap();
        assert_eq!(*rx.borrow_and_update(), RequestOutcome::Loading { request_id: id });

        assert_eq!(
            settle(&mut rx).await,
            RequestOutcome::Success {
                text: "A chocolate cake.".into()
            }
        );
    }

    #[tokio::test]
    async fn failure_becomes_error_message() {
        let mut holder = holder(
            MockGenerator::new().with_error(GenerateError::Network("connection refused".into())),
            Duration::from_secs(5),
        );
        let mut rx = holder.subscribe();
        holder.submit(image(), "x".into()).unwrap();

        assert_eq!(
            settle(&mut rx).await,
            RequestOutcome::Error {
                message: "Network error: connection refused".into()
            }
        );
    }

    #[tokio::test]
    async fn overlapping_submit_is_refused() {
        let gate = Arc::new(Notify::new());
        let mut holder = holder(
            MockGenerator::new()
                .with_text("first")
                .with_gate(Arc::clone(&gate)),
            Duration::from_secs(5),
        );
        let mut rx = holder.subscribe();

        let first = holder.submit(image(), "one".into()).unwrap();
        assert_eq!(holder.submit(image(), "two".into()), Err(SubmitError::Busy));
        assert_eq!(holder.outcome(), RequestOutcome::Loading { request_id: first });

        gate.notify_one();
        assert_eq!(
            settle(&mut rx).await,
            RequestOutcome::Success {
                text: "first".into()
            }
        );

        gate.notify_one();
        let second = holder.submit(image(), "two".into()).unwrap();
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn slow_generator_times_out() {
        let mut holder = holder(
            MockGenerator::new().with_delay(Duration::from_secs(30)),
            Duration::from_millis(50),
        );
        let mut rx = holder.subscribe();
        holder.submit(image(), "x".into()).unwrap();

        match settle(&mut rx).await {
            RequestOutcome::Error { message } => assert!(message.contains("timed out")),
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn settled_hook_runs_once_per_request() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut holder = holder(MockGenerator::new(), Duration::from_secs(5));
        let hook_count = Arc::clone(&count);
        holder.set_on_settled(move || {
            hook_count.fetch_add(1, Ordering::SeqCst);
        });
        let mut rx = holder.subscribe();

        holder.submit(image(), "x".into()).unwrap();
        settle(&mut rx).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    struct PanickingGenerator;

    #[async_trait::async_trait]
    impl Generator for PanickingGenerator {
        async fn generate(
            &self,
            _image: &EncodedImage,
            _prompt: &str,
        ) -> Result<String, GenerateError> {
            panic!("boom")
        }
    }

    #[tokio::test]
    async fn panicking_generator_settles_as_error() {
        let mut holder = RequestHolder::new(
            Arc::new(PanickingGenerator),
            Handle::current(),
            Duration::from_secs(5),
        );
        let mut rx = holder.subscribe();
        holder.submit(image(), "x".into()).unwrap();

        assert_eq!(
            settle(&mut rx).await,
            RequestOutcome::Error {
                message: "Request failed unexpectedly: boom".into()
            }
        );
        assert!(!holder.is_loading());
        assert!(holder.submit(image(), "again".into()).is_ok());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn success_log_counts_chars_not_bytes() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut holder = holder(MockGenerator::new().with_text("日本語"), Duration::from_secs(5));
        let mut rx = holder.subscribe();
        holder.submit(image(), "x".into()).unwrap();
        settle(&mut rx).await;

        let output = String::from_utf8_lossy(&logs.0.lock()).into_owned();
        assert!(output.contains("Request succeeded"), "{}", output);
        assert!(output.contains(" chars=3"), "{}", output);
        assert!(!output.contains(" chars=9"), "{}", output);
    }

    #[tokio::test]
    async fn dropping_holder_aborts_request() {
        let gate = Arc::new(Notify::new());
        let mut holder = holder(
            MockGenerator::new().with_gate(Arc::clone(&gate)),
            Duration::from_secs(5),
        );
        let mut rx = holder.subscribe();
        holder.submit(image(), "x".into()).unwrap();
        rx.borrow_and_update();

        drop(holder);
        let changed = tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("aborted task should release the sender");
        assert!(changed.is_err());
    }
}
