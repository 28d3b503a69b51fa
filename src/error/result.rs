//! Result alias and context extension.

use super::context::ErrorContext;
use super::portal_error::PortalError;

/// Result type for fallible portal operations.
pub type PortalResult<T> = Result<T, PortalError>;

/// Attach an [`ErrorContext`] to the error side of a result.
pub trait ResultExt<T> {
    fn context(self, ctx: ErrorContext) -> PortalResult<T>;

    /// Like [`ResultExt::context`], but the context is only built on error.
    fn with_context<F>(self, f: F) -> PortalResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<PortalError>,
{
    fn context(self, ctx: ErrorContext) -> PortalResult<T> {
        self.map_err(|e| Into::<PortalError>::into(e).with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> PortalResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| Into::<PortalError>::into(e).with_context(f()))
    }
}
