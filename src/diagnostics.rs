use std::sync::Arc;

use crate::error::ErrorKind;

/// A failure the session recorded but may not show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: &'static str,
    pub kind: ErrorKind,
    pub detail: String,
}

pub type DiagnosticsHook = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Default hook: forward to the tracing subscriber.
pub fn tracing_hook() -> DiagnosticsHook {
    Arc::new(|d: &Diagnostic| {
        tracing::warn!(operation = d.operation, kind = ?d.kind, "{}", d.detail);
    })
}
