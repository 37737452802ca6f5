/*!
 * Scope Guards
 *
 * Run an action when a scope ends, filtered by a firing policy
 */

use super::policy::{Always, OnFailure, OnSuccess, Policy};
use crate::holder::CallableHolder;
use crate::traits::{Action, Guard, TryHold};
use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::thread;

/// Runs its action on every scope exit
pub type ScopeExit<F> = ScopeGuard<F, Always>;

/// Runs its action only when the scope exits without a new failure
pub type ScopeSuccess<F> = ScopeGuard<F, OnSuccess>;

/// Runs its action only when a new failure leaves the scope
pub type ScopeFail<F> = ScopeGuard<F, OnFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    /// `unwinding` records whether a panic was already in flight when the
    /// guard was created, so only panics raised afterwards count.
    Armed { unwinding: bool },
    Disarmed,
}

impl GuardState {
    #[inline]
    fn capture<P: Policy>() -> Self {
        Self::Armed {
            unwinding: P::OBSERVES_FAILURE && thread::panicking(),
        }
    }

    #[inline]
    fn fires_on_exit<P: Policy>(self) -> bool {
        match self {
            Self::Armed { unwinding } => {
                let failed = P::OBSERVES_FAILURE && !unwinding && thread::panicking();
                P::fires(failed)
            }
            Self::Disarmed => false,
        }
    }
}

/// Guard that runs a deferred action at most once, when it is dropped
///
/// The guard starts armed. [`release`](Self::release) disarms it for the
/// rest of its life. On drop an armed guard asks its [`Policy`] whether
/// the scope failed and fires accordingly.
///
/// Moving a guard is a plain Rust move: the source no longer exists and the
/// destination carries on in whatever state the source was in.
///
/// # Example
///
/// ```
/// use scopekit::ScopeExit;
/// use std::cell::Cell;
///
/// let closed = Cell::new(false);
/// {
///     let _guard = ScopeExit::new(|| closed.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
#[must_use = "a guard fires when dropped; binding it to `_` fires it immediately"]
pub struct ScopeGuard<F: Action, P: Policy = Always> {
    action: ManuallyDrop<CallableHolder<F>>,
    state: GuardState,
    _policy: PhantomData<fn() -> P>,
}

impl<F: Action, P: Policy> ScopeGuard<F, P> {
    /// Create an armed guard that owns `action`
    #[inline]
    pub fn new(action: F) -> Self {
        Self::with_holder(CallableHolder::new(action))
    }

    /// Create an armed guard from a copy of `source`
    ///
    /// If the copy fails, `source` itself is invoked once before the error
    /// is returned, unless the policy is [`OnSuccess`]: the action was
    /// supplied to clean up after exactly this kind of failure and would
    /// otherwise be lost. The same happens if the copy panics.
    pub fn try_new<U>(source: U) -> Result<Self, U::Error>
    where
        U: Action + TryHold<F>,
    {
        let mut fallback = ScopeExit::new(source);
        if !P::FIRES_ON_FAILED_SETUP {
            fallback.release();
        }

        let holder = match CallableHolder::try_hold_from(fallback.action()) {
            Ok(holder) => holder,
            Err(e) => {
                if fallback.is_armed() {
                    log::debug!("Guard setup failed, running the caller's action in its place");
                }
                return Err(e);
            }
        };

        fallback.release();
        Ok(Self::with_holder(holder))
    }

    #[inline]
    fn with_holder(action: CallableHolder<F>) -> Self {
        Self {
            action: ManuallyDrop::new(action),
            state: GuardState::capture::<P>(),
            _policy: PhantomData,
        }
    }

    /// Disarm the guard so its action never runs
    ///
    /// Idempotent.
    #[inline]
    pub fn release(&mut self) {
        self.state = GuardState::Disarmed;
    }

    /// Check if the guard may still fire
    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, GuardState::Armed { .. })
    }

    /// Access the held action
    #[inline]
    pub fn action(&self) -> &F {
        self.action.get()
    }

    /// Disarm the guard and hand back its action without running it
    pub fn into_inner(self) -> F {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the action is taken exactly once.
        let action = unsafe { ManuallyDrop::take(&mut this.action) };
        action.into_inner()
    }

    /// Settle the guard from an explicit outcome instead of on drop
    ///
    /// An `Err` counts as a failure. The guard fires (if armed and the
    /// policy agrees) and `outcome` is passed back unchanged, so the call
    /// can sit at the tail of a function:
    ///
    /// ```
    /// use scopekit::ScopeFail;
    /// use std::cell::Cell;
    ///
    /// let rolled_back = Cell::new(false);
    /// let outcome: Result<(), &str> = Err("write failed");
    /// let outcome = ScopeFail::new(|| rolled_back.set(true)).finish(outcome);
    /// assert!(outcome.is_err());
    /// assert!(rolled_back.get());
    /// ```
    pub fn finish<T, E>(self, outcome: Result<T, E>) -> Result<T, E> {
        let fire = self.is_armed() && P::fires(outcome.is_err());
        let action = self.into_inner();
        if fire {
            action.invoke();
        }
        outcome
    }
}

impl<F: Action, P: Policy> Guard for ScopeGuard<F, P> {
    fn is_armed(&self) -> bool {
        ScopeGuard::is_armed(self)
    }

    fn release(&mut self) {
        ScopeGuard::release(self)
    }
}

impl<F: Action, P: Policy> Drop for ScopeGuard<F, P> {
    fn drop(&mut self) {
        // SAFETY: drop runs at most once and `into_inner` skips it.
        let action = unsafe { ManuallyDrop::take(&mut self.action) };
        if self.state.fires_on_exit::<P>() {
            action.invoke();
        }
    }
}

impl<F: Action, P: Policy> fmt::Debug for ScopeGuard<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("policy", &std::any::type_name::<P>())
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}
