/*!
 * Error Types
 *
 * Failures raised while adopting a resource or its releaser
 */

use thiserror::Error;

/// Result type for operations that adopt a resource and a releaser
pub type AdoptResult<T, ER, ED> = Result<T, AdoptError<ER, ED>>;

/// Which half of a (resource, releaser) pair could not be adopted
///
/// `ER` is the resource's copy error and `ED` the releaser's. By the time
/// this error reaches the caller, any compensating release has already
/// happened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptError<ER, ED> {
    /// The resource could not be stored; nothing was acquired
    #[error("failed to adopt resource: {0}")]
    Resource(ER),

    /// The releaser could not be stored after the resource was
    #[error("failed to adopt releaser: {0}")]
    Releaser(ED),
}

impl<ER, ED> AdoptError<ER, ED> {
    /// Check if the failure happened after the resource was stored
    #[inline]
    pub fn is_releaser(&self) -> bool {
        matches!(self, Self::Releaser(_))
    }
}

impl<E> AdoptError<E, E> {
    /// Unwrap the underlying error when both halves share an error type
    pub fn into_inner(self) -> E {
        match self {
            Self::Resource(e) | Self::Releaser(e) => e,
        }
    }
}
