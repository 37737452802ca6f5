/*!
 * Firing Policies
 *
 * Decide whether an armed guard runs its action when its scope ends
 */

/// Controls in which cases an armed guard fires
///
/// A scope "fails" when a panic that started after the guard was created
/// is unwinding through it, or when the caller hands an `Err` to
/// [`ScopeGuard::finish`](super::ScopeGuard::finish).
pub trait Policy {
    /// Whether the guard must snapshot the unwinding state at creation
    const OBSERVES_FAILURE: bool;

    /// Whether the caller's action still runs when the guard itself could
    /// not be built
    const FIRES_ON_FAILED_SETUP: bool;

    /// Return `true` if an armed guard should fire for this outcome
    fn fires(failed: bool) -> bool;
}

/// Fire on every scope exit, successful or not
#[derive(Debug)]
pub enum Always {}

/// Fire only when the scope exits without a new failure
#[derive(Debug)]
pub enum OnSuccess {}

/// Fire only when a new failure is leaving the scope
#[derive(Debug)]
pub enum OnFailure {}

impl Policy for Always {
    const OBSERVES_FAILURE: bool = false;
    const FIRES_ON_FAILED_SETUP: bool = true;

    #[inline(always)]
    fn fires(_failed: bool) -> bool {
        true
    }
}

impl Policy for OnSuccess {
    const OBSERVES_FAILURE: bool = true;
    // A failed setup is itself a failure.
    const FIRES_ON_FAILED_SETUP: bool = false;

    #[inline]
    fn fires(failed: bool) -> bool {
        !failed
    }
}

impl Policy for OnFailure {
    const OBSERVES_FAILURE: bool = true;
    const FIRES_ON_FAILED_SETUP: bool = true;

    #[inline]
    fn fires(failed: bool) -> bool {
        failed
    }
}
