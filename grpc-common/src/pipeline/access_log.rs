use tonic::Code;
use tracing::{info, warn};

use crate::pipeline::CallStage;
use crate::pipeline::call::{CallContext, CallOutcome};

/// Emits one access log line per call once its outcome is known.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessLogStage;

impl AccessLogStage {
    pub const fn new() -> Self {
        Self
    }
}

impl CallStage for AccessLogStage {
    fn after(&self, call: &CallContext, outcome: &CallOutcome) {
        let user = call
            .principal()
            .map_or("-", |principal| principal.username.as_str());
        let elapsed_ms = u64::try_from(call.elapsed().as_millis()).unwrap_or(u64::MAX);
        let code = outcome.code();

        match outcome {
            CallOutcome::Failed { code, message }
                if !matches!(code, Code::NotFound | Code::Unauthenticated) =>
            {
                warn!(
                    operation = call.operation(),
                    ?code,
                    user,
                    elapsed_ms,
                    error = message.as_str(),
                    "call failed"
                );
            }
            _ => info!(
                operation = call.operation(),
                ?code,
                user,
                elapsed_ms,
                "call finished"
            ),
        }
    }
}
