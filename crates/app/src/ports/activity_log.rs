//! Activity log port: the user-visible record of what heatgate did.

use std::sync::Arc;

/// Best-effort sink for activity messages.
///
/// Implementations must never fail or panic: a message that cannot be
/// written is dropped.
pub trait ActivityLog: Send + Sync {
    fn record(&self, message: &str);
}

impl<T: ActivityLog + ?Sized> ActivityLog for Arc<T> {
    fn record(&self, message: &str) {
        (**self).record(message);
    }
}
