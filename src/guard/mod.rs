/*!
 * Scope Guards
 *
 * Deferred actions tied to the end of a scope.
 *
 * ## Policies
 *
 * - **Always** (`ScopeExit`): fire on every exit unless released
 * - **OnSuccess** (`ScopeSuccess`): fire unless a new failure is leaving the scope
 * - **OnFailure** (`ScopeFail`): fire only while a new failure is leaving the scope
 *
 * A failure is a panic that started after the guard was created. Code that
 * reports failure through `Result` instead settles the guard explicitly
 * with [`ScopeGuard::finish`].
 *
 * ## Example
 *
 * ```
 * use scopekit::guard::{defer, on_failure, on_success};
 * use std::cell::RefCell;
 *
 * let log = RefCell::new(Vec::new());
 * {
 *     let _cleanup = defer(|| log.borrow_mut().push("cleanup"));
 *     let _commit = on_success(|| log.borrow_mut().push("commit"));
 *     let mut rollback = on_failure(|| log.borrow_mut().push("rollback"));
 *     log.borrow_mut().push("work");
 *     rollback.release();
 * }
 * assert_eq!(*log.borrow(), ["work", "commit", "cleanup"]);
 * ```
 */

mod policy;
mod scope;

pub use policy::{Always, OnFailure, OnSuccess, Policy};
pub use scope::{ScopeExit, ScopeFail, ScopeGuard, ScopeSuccess};

/// Run `action` when the returned guard is dropped
#[inline]
pub fn defer<F: FnOnce()>(action: F) -> ScopeExit<F> {
    ScopeGuard::new(action)
}

/// Run `action` when the returned guard is dropped without a new failure
#[inline]
pub fn on_success<F: FnOnce()>(action: F) -> ScopeSuccess<F> {
    ScopeGuard::new(action)
}

/// Run `action` only if a new failure unwinds past the returned guard
#[inline]
pub fn on_failure<F: FnOnce()>(action: F) -> ScopeFail<F> {
    ScopeGuard::new(action)
}

/// Run the given statements when the enclosing scope ends
///
/// ```
/// use std::cell::Cell;
///
/// let done = Cell::new(false);
/// {
///     scopekit::defer! { done.set(true); }
///     assert!(!done.get());
/// }
/// assert!(done.get());
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::guard::defer(|| { $($body)* });
    };
}
