//! Process port: how the application stops on unrecoverable errors.

use std::sync::Arc;

/// Ends the process.
///
/// The production implementation never returns. Test implementations may
/// return, in which case the caller propagates the fatal error instead.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

impl<T: Terminator + ?Sized> Terminator for Arc<T> {
    fn terminate(&self, code: i32) {
        (**self).terminate(code);
    }
}
