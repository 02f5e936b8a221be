//! Request pipeline shared by every gRPC call.
//!
//! A [`Pipeline`] is an ordered list of [`CallStage`]s wrapped around a
//! handler. Before the handler runs, each stage's [`CallStage::before`] hook
//! is invoked in order, and the first rejection short-circuits both the
//! remaining stages and the handler. Once the call has an outcome, every
//! stage's [`CallStage::after`] hook observes it, in reverse order, exactly
//! once. This holds for rejected, failed, completed, and cancelled calls
//! alike.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use tonic::{Request, Response, Status};

use crate::pipeline::call::{CallContext, CallGuard, CallOutcome};
use crate::pipeline::stream::ObservedStream;

/// Access logging stage.
pub mod access_log;
/// Authentication stage.
pub mod auth;
/// Call context, outcome, and completion tracking.
pub mod call;
/// Response streams that report their completion to the pipeline.
pub mod stream;

/// Boxed server-streaming response body.
pub type ResponseStream<T> = BoxStream<'static, Result<T, Status>>;

/// A single step of the request pipeline.
pub trait CallStage: Debug + Send + Sync {
    /// Runs before the handler.
    ///
    /// # Errors
    ///
    /// Returning an error rejects the call with that status. No later stage
    /// and no handler code runs.
    fn before(&self, _call: &mut CallContext) -> Result<(), Status> {
        Ok(())
    }

    /// Observes the final outcome of the call.
    fn after(&self, _call: &CallContext, _outcome: &CallOutcome) {}
}

/// Ordered chain of call stages.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn CallStage>]>,
}

/// Builder for [`Pipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    stages: Vec<Arc<dyn CallStage>>,
}

impl PipelineBuilder {
    /// Appends a stage. Stages run in the order they were added.
    #[must_use]
    pub fn stage<S: CallStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages.into(),
        }
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub(crate) fn stages(&self) -> &[Arc<dyn CallStage>] {
        &self.stages
    }

    /// Runs a unary call through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the rejecting stage's status, or the handler's own error.
    pub async fn unary<T, U, F, Fut>(
        &self,
        operation: &'static str,
        request: Request<T>,
        handler: F,
    ) -> Result<Response<U>, Status>
    where
        F: FnOnce(Request<T>) -> Fut,
        Fut: Future<Output = Result<Response<U>, Status>>,
    {
        let (guard, request) = self.begin(operation, request)?;
        let result = handler(request).await;
        guard.finish(match &result {
            Ok(_) => CallOutcome::Completed,
            Err(status) => CallOutcome::from_status(status),
        });
        result
    }

    /// Runs a server-streaming call through the pipeline.
    ///
    /// The outcome is reported once the returned stream ends, yields an
    /// error, or is dropped by the transport.
    ///
    /// # Errors
    ///
    /// Returns the rejecting stage's status, or the handler's own error
    /// raised before any message was produced.
    pub async fn server_streaming<T, U, F, Fut>(
        &self,
        operation: &'static str,
        request: Request<T>,
        handler: F,
    ) -> Result<Response<ResponseStream<U>>, Status>
    where
        U: Send + 'static,
        F: FnOnce(Request<T>) -> Fut,
        Fut: Future<Output = Result<Response<ResponseStream<U>>, Status>>,
    {
        let (guard, request) = self.begin(operation, request)?;
        match handler(request).await {
            Ok(response) => Ok(response.map(|stream| ObservedStream::new(stream, guard).boxed())),
            Err(status) => {
                guard.finish(CallOutcome::from_status(&status));
                Err(status)
            }
        }
    }

    fn begin<T>(
        &self,
        operation: &'static str,
        request: Request<T>,
    ) -> Result<(CallGuard, Request<T>), Status> {
        let (metadata, mut extensions, message) = request.into_parts();
        let mut guard = CallGuard::new(self.clone(), CallContext::new(operation, metadata));

        for stage in self.stages.iter() {
            if let Err(status) = stage.before(guard.call_mut()) {
                guard.finish(CallOutcome::from_status(&status));
                return Err(status);
            }
        }

        let call = guard.call();
        if let Some(principal) = call.principal() {
            extensions.insert(principal.clone());
        }
        let request = Request::from_parts(call.metadata().clone(), extensions, message);
        Ok((guard, request))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::Mutex;

    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Collects formatted log output of the current thread.
    #[derive(Debug, Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn install(&self) -> DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::TRACE)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        pub fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Stage that records every hook invocation.
    #[derive(Debug, Default)]
    pub struct RecordingStage {
        pub name: &'static str,
        pub reject: Option<Status>,
        pub events: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingStage {
        pub fn new(name: &'static str, events: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                name,
                reject: None,
                events: Arc::clone(events),
            }
        }

        pub fn rejecting(mut self, status: Status) -> Self {
            self.reject = Some(status);
            self
        }
    }

    impl CallStage for RecordingStage {
        fn before(&self, call: &mut CallContext) -> Result<(), Status> {
            self.events
                .lock()
                .unwrap()
                .push(format!("{} before {}", self.name, call.operation()));
            match &self.reject {
                Some(status) => Err(status.clone()),
                None => Ok(()),
            }
        }

        fn after(&self, call: &CallContext, outcome: &CallOutcome) {
            self.events.lock().unwrap().push(format!(
                "{} after {} {:?}",
                self.name,
                call.operation(),
                outcome.code()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use futures::stream;
    use tonic::Code;

    use super::testing::RecordingStage;
    use super::*;
    use crate::auth::credentials::Principal;

    const OPERATION: &str = "/test.Service/Call";

    fn events() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[tokio::test]
    async fn unary_runs_stages_in_order() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("first", &events))
            .stage(RecordingStage::new("second", &events))
            .build();

        let response = pipeline
            .unary(OPERATION, Request::new(2), |request| async move {
                Ok(Response::new(request.into_inner() * 2))
            })
            .await
            .unwrap();
        assert_eq!(response.into_inner(), 4);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "first before /test.Service/Call",
                "second before /test.Service/Call",
                "second after /test.Service/Call Ok",
                "first after /test.Service/Call Ok",
            ]
        );
    }

    #[tokio::test]
    async fn rejection_skips_handler_but_is_observed() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(
                RecordingStage::new("auth", &events)
                    .rejecting(Status::unauthenticated("no credentials")),
            )
            .stage(RecordingStage::new("log", &events))
            .build();

        let called = AtomicBool::new(false);
        let status = pipeline
            .unary(OPERATION, Request::new(()), |_request| async {
                called.store(true, Ordering::SeqCst);
                Ok(Response::new(()))
            })
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Unauthenticated);
        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "auth before /test.Service/Call",
                "log after /test.Service/Call Unauthenticated",
                "auth after /test.Service/Call Unauthenticated",
            ]
        );
    }

    #[tokio::test]
    async fn unary_failure_is_observed() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("log", &events))
            .build();

        let status = pipeline
            .unary(OPERATION, Request::new(()), |_request| async {
                Err::<Response<()>, _>(Status::not_found("missing"))
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(
            events.lock().unwrap().last().unwrap(),
            "log after /test.Service/Call NotFound"
        );
    }

    #[tokio::test]
    async fn principal_is_forwarded_to_handler() {
        #[derive(Debug)]
        struct FixedPrincipal;

        impl CallStage for FixedPrincipal {
            fn before(&self, call: &mut CallContext) -> Result<(), Status> {
                call.set_principal(Principal {
                    username: "reader".into(),
                });
                Ok(())
            }
        }

        let pipeline = Pipeline::builder().stage(FixedPrincipal).build();
        let username = pipeline
            .unary(OPERATION, Request::new(()), |request| async move {
                let principal = request.extensions().get::<Principal>().cloned();
                Ok(Response::new(principal.map(|principal| principal.username)))
            })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(username.as_deref(), Some("reader"));
    }

    #[tokio::test]
    async fn stream_outcome_is_reported_on_completion() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("log", &events))
            .build();

        let stream = pipeline
            .server_streaming(OPERATION, Request::new(()), |_request| async {
                Ok(Response::new(stream::iter([Ok(1), Ok(2), Ok(3)]).boxed()))
            })
            .await
            .unwrap()
            .into_inner();

        // Nothing is reported until the stream has been drained.
        assert_eq!(events.lock().unwrap().len(), 1);

        let items: Vec<i32> = stream.map(Result::unwrap).collect().await;
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "log before /test.Service/Call",
                "log after /test.Service/Call Ok",
            ]
        );
    }

    #[tokio::test]
    async fn dropped_stream_is_reported_as_cancelled() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("log", &events))
            .build();

        let mut stream = pipeline
            .server_streaming(OPERATION, Request::new(()), |_request| async {
                Ok(Response::new(stream::iter([Ok(1), Ok(2), Ok(3)]).boxed()))
            })
            .await
            .unwrap()
            .into_inner();

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        drop(stream);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "log before /test.Service/Call",
                "log after /test.Service/Call Cancelled",
            ]
        );
    }

    #[tokio::test]
    async fn stream_error_is_reported_once() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("log", &events))
            .build();

        let stream = pipeline
            .server_streaming(OPERATION, Request::new(()), |_request| async {
                Ok(Response::new(
                    stream::iter([Ok(1), Err(Status::internal("store failed")), Ok(2)]).boxed(),
                ))
            })
            .await
            .unwrap()
            .into_inner();

        let items: Vec<Result<i32, Status>> = stream.collect().await;
        assert_eq!(items.len(), 3);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "log before /test.Service/Call",
                "log after /test.Service/Call Internal",
            ]
        );
    }

    #[tokio::test]
    async fn streaming_handler_failure_is_reported() {
        let events = events();
        let pipeline = Pipeline::builder()
            .stage(RecordingStage::new("log", &events))
            .build();

        let status = pipeline
            .server_streaming::<(), i32, _, _>(OPERATION, Request::new(()), |_request| async {
                Err(Status::unavailable("store offline"))
            })
            .await
            .err()
            .unwrap();
        assert_eq!(status.code(), Code::Unavailable);
        assert_eq!(
            events.lock().unwrap().last().unwrap(),
            "log after /test.Service/Call Unavailable"
        );
    }
}
