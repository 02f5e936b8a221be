use std::time::{Duration, Instant};

use tonic::{Code, Status, metadata::MetadataMap};
use tracing::Span;

use crate::auth::credentials::Principal;
use crate::pipeline::Pipeline;

/// Per-call state shared by the pipeline stages.
#[derive(Debug)]
pub struct CallContext {
    operation: &'static str,
    metadata: MetadataMap,
    principal: Option<Principal>,
    started_at: Instant,
}

/// How a call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The handler finished and every response message was sent.
    Completed,
    /// The call was rejected or failed with a status.
    Failed { code: Code, message: String },
    /// The client went away before the call finished.
    Cancelled,
}

impl CallContext {
    pub fn new(operation: &'static str, metadata: MetadataMap) -> Self {
        Self {
            operation,
            metadata,
            principal: None,
            started_at: Instant::now(),
        }
    }

    /// Fully-qualified gRPC method path, e.g. `/package.Service/Method`.
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    pub const fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub const fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl CallOutcome {
    pub fn from_status(status: &Status) -> Self {
        match status.code() {
            Code::Cancelled => Self::Cancelled,
            code => Self::Failed {
                code,
                message: status.message().to_string(),
            },
        }
    }

    pub const fn code(&self) -> Code {
        match self {
            Self::Completed => Code::Ok,
            Self::Failed { code, .. } => *code,
            Self::Cancelled => Code::Cancelled,
        }
    }
}

/// Reports a call's outcome to every stage exactly once.
///
/// Dropping an unfinished guard reports [`CallOutcome::Cancelled`], which is
/// what happens when the transport abandons a handler future or a response
/// stream.
///
/// Stages observe the outcome inside the span that was current when the call
/// began, even when a response stream finishes long after the handler
/// returned.
#[derive(Debug)]
pub struct CallGuard {
    pipeline: Pipeline,
    call: CallContext,
    span: Span,
    finished: bool,
}

impl CallGuard {
    pub(crate) fn new(pipeline: Pipeline, call: CallContext) -> Self {
        Self {
            pipeline,
            call,
            span: Span::current(),
            finished: false,
        }
    }

    pub const fn call(&self) -> &CallContext {
        &self.call
    }

    pub(crate) const fn call_mut(&mut self) -> &mut CallContext {
        &mut self.call
    }

    pub fn finish(mut self, outcome: CallOutcome) {
        self.report(&outcome);
    }

    fn report(&mut self, outcome: &CallOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        let _entered = self.span.enter();
        for stage in self.pipeline.stages().iter().rev() {
            stage.after(&self.call, outcome);
        }
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.report(&CallOutcome::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_status() {
        assert_eq!(
            CallOutcome::from_status(&Status::not_found("book 7")),
            CallOutcome::Failed {
                code: Code::NotFound,
                message: "book 7".into()
            }
        );
        assert_eq!(
            CallOutcome::from_status(&Status::cancelled("client left")),
            CallOutcome::Cancelled
        );
        assert_eq!(CallOutcome::Completed.code(), Code::Ok);
        assert_eq!(CallOutcome::Cancelled.code(), Code::Cancelled);
    }
}
