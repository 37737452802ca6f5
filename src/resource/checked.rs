/*!
 * Checked Construction
 *
 * Arm a unique resource only when the acquired value is not the
 * "nothing acquired" sentinel, e.g. `-1` from `open(2)`
 */

use super::unique::UniqueResource;
use crate::errors::AdoptResult;
use crate::traits::{Release, TryHold};

impl<R, D: Release<R>> UniqueResource<R, D> {
    /// Take ownership of `resource` unless it equals `sentinel`
    ///
    /// The object is always built, so the value stays inspectable, but it
    /// is armed only when `resource != *sentinel`.
    ///
    /// ```
    /// use scopekit::UniqueResource;
    ///
    /// let fd = UniqueResource::checked(-1, &-1, |_: &i32| {});
    /// assert!(!fd.is_armed());
    /// ```
    pub fn checked<S>(resource: R, sentinel: &S, releaser: D) -> Self
    where
        R: PartialEq<S>,
        S: ?Sized,
    {
        let armed = resource != *sentinel;
        if !armed {
            log::trace!("Resource matches its sentinel, building disarmed");
        }
        Self::from_parts(resource, releaser, armed)
    }

    /// Fallible form of [`checked`](Self::checked), built from copies
    ///
    /// The sentinel is compared against the caller's source value, before
    /// any copy is attempted.
    pub fn try_checked<R2, D2, S>(
        resource: R2,
        sentinel: &S,
        releaser: D2,
    ) -> AdoptResult<Self, R2::Error, D2::Error>
    where
        R2: TryHold<R> + PartialEq<S>,
        D2: TryHold<D> + Release<R>,
        S: ?Sized,
    {
        let armed = resource != *sentinel;
        Self::try_new(resource, releaser, armed)
    }
}

/// Build a [`UniqueResource`] armed only if `resource != *sentinel`
#[inline]
pub fn make_checked<R, D, S>(resource: R, sentinel: &S, releaser: D) -> UniqueResource<R, D>
where
    R: PartialEq<S>,
    D: Release<R>,
    S: ?Sized,
{
    UniqueResource::checked(resource, sentinel, releaser)
}
