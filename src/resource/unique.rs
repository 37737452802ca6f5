/*!
 * Unique Resources
 *
 * A resource value paired with its releaser, released exactly once
 */

use crate::errors::{AdoptError, AdoptResult};
use crate::guard::ScopeExit;
use crate::holder::Holder;
use crate::traits::{Action, Guard, Release, TryHold};
use std::fmt;
use std::ops::Deref;

/// Owns a resource together with the releaser responsible for it
///
/// While armed, the current resource value is live and the current
/// releaser will run on it exactly once: on [`reset`](Self::reset), on
/// [`reset_with`](Self::reset_with), or on drop. A disarmed object owes
/// nothing but still exposes its last resource value through
/// [`get`](Self::get).
///
/// The object is move-only. Moving it moves the obligation with it.
///
/// # Example
///
/// ```
/// use scopekit::UniqueResource;
/// use std::cell::RefCell;
///
/// let closed = RefCell::new(Vec::new());
/// {
///     let mut fd = UniqueResource::new(3, |fd: &i32| closed.borrow_mut().push(*fd));
///     fd.reset_with(4); // closes 3, now owns 4
/// }
/// assert_eq!(*closed.borrow(), vec![3, 4]);
/// ```
#[must_use = "dropping a UniqueResource releases its resource immediately"]
pub struct UniqueResource<R, D: Release<R>> {
    pub(super) resource: Holder<R>,
    pub(super) releaser: Holder<D>,
    pub(super) armed: bool,
}

/// Releases an adopted resource with a releaser that never got adopted
struct Compensation<'a, R, D: Release<R>> {
    releaser: D,
    resource: &'a R,
}

impl<R, D: Release<R>> Action for Compensation<'_, R, D> {
    fn invoke(mut self) {
        log::debug!("Releaser adoption failed, releasing resource with the caller's releaser");
        self.releaser.release(self.resource);
    }
}

impl<R, D: Release<R>> UniqueResource<R, D> {
    /// Take ownership of `resource`, to be released by `releaser`
    #[inline]
    pub fn new(resource: R, releaser: D) -> Self {
        Self::from_parts(resource, releaser, true)
    }

    /// Build from owned parts, armed only if `armed` is set
    #[inline]
    pub fn from_parts(resource: R, releaser: D, armed: bool) -> Self {
        Self {
            resource: Holder::new(resource),
            releaser: Holder::new(releaser),
            armed,
        }
    }

    /// Build from copies of a resource source and a releaser source
    ///
    /// The resource is stored first. If that fails nothing has been
    /// acquired and nothing is released. The releaser is stored second; if
    /// that fails (or panics) while `armed`, the stored resource is
    /// released with the caller's `releaser` before the error is returned,
    /// since no object will exist to release it later.
    pub fn try_new<R2, D2>(
        resource: R2,
        releaser: D2,
        armed: bool,
    ) -> AdoptResult<Self, R2::Error, D2::Error>
    where
        R2: TryHold<R>,
        D2: TryHold<D> + Release<R>,
    {
        let resource: Holder<R> = Holder::try_hold_from(&resource).map_err(AdoptError::Resource)?;

        let mut fallback = ScopeExit::new(Compensation {
            releaser,
            resource: resource.get(),
        });
        if !armed {
            fallback.release();
        }

        let releaser: Holder<D> =
            Holder::try_hold_from(&fallback.action().releaser).map_err(AdoptError::Releaser)?;

        fallback.release();
        drop(fallback);

        Ok(Self {
            resource,
            releaser,
            armed,
        })
    }

    /// Disarm without releasing
    ///
    /// Idempotent. The resource value stays readable.
    #[inline]
    pub fn release(&mut self) {
        self.armed = false;
    }

    /// Release the resource now if armed, then stay disarmed
    ///
    /// The object is disarmed before the releaser runs, so a releaser that
    /// observes this object sees it disarmed. Calling `reset` again is a
    /// no-op.
    pub fn reset(&mut self) {
        if self.armed {
            self.armed = false;
            self.releaser.get_mut().release(self.resource.get());
        }
    }

    /// Release the current resource (if armed), then own `resource`
    pub fn reset_with(&mut self, resource: R) {
        self.reset();
        self.resource.assign(resource);
        self.armed = true;
    }

    /// Release the current resource (if armed), then own a copy of `source`
    ///
    /// If the copy fails (or panics) the object owns neither the old value,
    /// already released, nor a new one: `source` is released with the
    /// current releaser and the object is left disarmed.
    pub fn try_reset_from<U>(&mut self, source: &U) -> Result<(), U::Error>
    where
        U: TryHold<R> + ?Sized,
        D: Release<U>,
    {
        self.reset();

        let releaser = &mut self.releaser;
        let mut fallback = ScopeExit::new(|| {
            log::debug!("Resource assignment failed, releasing the replacement instead");
            Release::<U>::release(releaser.get_mut(), source);
        });

        self.resource.try_assign_from(source)?;

        fallback.release();
        drop(fallback);
        self.armed = true;
        Ok(())
    }

    /// Access the resource value
    #[inline]
    pub fn get(&self) -> &R {
        self.resource.get()
    }

    /// Access the releaser
    #[inline]
    pub fn releaser(&self) -> &D {
        self.releaser.get()
    }

    /// Check if a release is still owed
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl<R, D: Release<R>> Guard for UniqueResource<R, D> {
    fn is_armed(&self) -> bool {
        self.armed
    }

    fn release(&mut self) {
        UniqueResource::release(self)
    }
}

impl<R, D: Release<R>> Drop for UniqueResource<R, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<R: Default, D: Release<R> + Default> Default for UniqueResource<R, D> {
    /// A disarmed object holding default parts
    fn default() -> Self {
        Self::from_parts(R::default(), D::default(), false)
    }
}

impl<R: Deref, D: Release<R>> Deref for UniqueResource<R, D> {
    type Target = R::Target;

    #[inline]
    fn deref(&self) -> &R::Target {
        self.resource.get()
    }
}

impl<R: fmt::Debug, D: Release<R>> fmt::Debug for UniqueResource<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueResource")
            .field("resource", self.resource.get())
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}
