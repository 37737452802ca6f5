/*!
 * Guard Traits
 *
 * Core abstractions shared by scope guards and unique resources
 */

use std::convert::Infallible;

/// A deferred action, invoked at most once
///
/// Every `FnOnce()` closure is an action. Implement it directly for types
/// that need to be more than a closure, such as callables whose copy can
/// fail (see [`TryHold`]).
///
/// # Panics
///
/// Actions run from destructors. An action that panics while the thread is
/// already unwinding aborts the process, so actions should not panic.
pub trait Action {
    /// Run the action, consuming it
    fn invoke(self);
}

impl<F: FnOnce()> Action for F {
    #[inline]
    fn invoke(self) {
        self()
    }
}

/// Releases resources of type `R`
///
/// Every `FnMut(&R)` closure is a releaser. Closures passed where a
/// `Release<R>` is expected need an annotated parameter (`|fd: &RawFd| ...`)
/// so the compiler infers a signature that accepts any borrow.
pub trait Release<R: ?Sized> {
    /// Release `resource`
    ///
    /// Called at most once per acquired value. Must not panic.
    fn release(&mut self, resource: &R);
}

impl<R: ?Sized, F: FnMut(&R)> Release<R> for F {
    #[inline]
    fn release(&mut self, resource: &R) {
        self(resource)
    }
}

/// Produces a `T` from a borrowed source, possibly failing
///
/// This is the copy a holder falls back to when a value cannot simply be
/// moved into place. The source is only borrowed, so it is still intact
/// (and usable for compensation) when the copy fails.
///
/// Every `T: Clone` copies itself infallibly. Types with a fallible copy
/// implement the trait themselves with a real error type.
pub trait TryHold<T> {
    /// Error raised when no `T` could be produced
    type Error;

    /// Produce a new `T` from `self`
    fn try_hold(&self) -> Result<T, Self::Error>;
}

impl<T: Clone> TryHold<T> for T {
    type Error = Infallible;

    #[inline]
    fn try_hold(&self) -> Result<T, Infallible> {
        Ok(self.clone())
    }
}

/// Lifecycle surface shared by every guard in this crate
///
/// A guard is armed while it holds an obligation to act on drop.
pub trait Guard {
    /// Check if the guard still holds its obligation
    fn is_armed(&self) -> bool;

    /// Give up the obligation without acting on it
    ///
    /// Idempotent: releasing a disarmed guard does nothing.
    fn release(&mut self);
}
