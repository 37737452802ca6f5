/*!
 * Scopekit
 *
 * Deterministic cleanup primitives:
 *
 * - **Scope guards** run a deferred action when a scope ends, always, only
 *   on success, or only on failure
 * - **Unique resources** pair a resource value with its releaser and run the
 *   releaser exactly once, including when building or moving the pair
 *   fails partway through
 *
 * Both are single-owner and single-thread. Ownership of a release
 * obligation moves with the object and is never shared.
 *
 * ## Example
 *
 * ```
 * use scopekit::{ScopeFail, UniqueResource};
 * use std::cell::RefCell;
 *
 * let events = RefCell::new(Vec::new());
 * {
 *     let buffer = UniqueResource::new(7, |id: &u32| events.borrow_mut().push(format!("free {id}")));
 *     let _undo = ScopeFail::new(|| events.borrow_mut().push("undo".to_string()));
 *     assert_eq!(*buffer.get(), 7);
 * }
 * assert_eq!(*events.borrow(), ["free 7"]);
 * ```
 */

pub mod errors;
pub mod guard;
pub mod holder;
pub mod resource;
pub mod traits;

// Re-exports
pub use errors::{AdoptError, AdoptResult};
pub use guard::{
    defer, on_failure, on_success, Always, OnFailure, OnSuccess, Policy, ScopeExit, ScopeFail,
    ScopeGuard, ScopeSuccess,
};
pub use holder::{CallableHolder, Holder};
pub use resource::{make_checked, UniqueResource};
pub use traits::{Action, Guard, Release, TryHold};
