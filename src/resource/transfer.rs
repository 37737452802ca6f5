/*!
 * In-Place Transfers
 *
 * Move a release obligation out of an object that stays where it is
 */

use super::unique::UniqueResource;
use crate::errors::{AdoptError, AdoptResult};
use crate::guard::ScopeExit;
use crate::holder::Holder;
use crate::traits::{Action, Release, TryHold};
use std::mem;

/// Releases a resource that was moved out of `source` when the rest of the
/// transfer fails, disarms `source`, and puts the value back into it.
struct ReleaseOnBehalf<'a, R, D: Release<R>> {
    source: &'a mut UniqueResource<R, D>,
    resource: R,
}

impl<R, D: Release<R>> Action for ReleaseOnBehalf<'_, R, D> {
    fn invoke(self) {
        let Self { source, resource } = self;
        if source.armed {
            log::debug!("Releaser transfer failed, releasing moved-out resource for its source");
            source.armed = false;
            source.releaser.get_mut().release(&resource);
        }
        source.resource.assign(resource);
    }
}

impl<R, D: Release<R>> UniqueResource<R, D> {
    /// Move the obligation into a new object, leaving `self` disarmed
    ///
    /// The resource is moved out (leaving `R::default()` behind) and the
    /// releaser is copied, since `self` must keep a usable releaser. If the
    /// copy fails or panics after the resource has left, the moved-out
    /// resource is released right away with `self`'s releaser (if armed),
    /// `self` is disarmed, and the value goes back into `self`.
    pub fn try_take(&mut self) -> Result<Self, D::Error>
    where
        R: Default,
        D: TryHold<D>,
    {
        let resource = self.resource.take();
        let fallback = ScopeExit::new(ReleaseOnBehalf {
            source: self,
            resource,
        });

        let releaser = fallback.action().source.releaser.try_duplicate()?;

        let ReleaseOnBehalf { source, resource } = fallback.into_inner();
        let armed = mem::replace(&mut source.armed, false);

        Ok(Self {
            resource: Holder::new(resource),
            releaser,
            armed,
        })
    }

    /// Copy resource and releaser into a new object, leaving `self` disarmed
    ///
    /// `self` is only disarmed once both copies exist, so a failure leaves
    /// it exactly as it was, still responsible for its resource.
    pub fn try_take_copied(
        &mut self,
    ) -> AdoptResult<Self, <R as TryHold<R>>::Error, <D as TryHold<D>>::Error>
    where
        R: TryHold<R>,
        D: TryHold<D>,
    {
        let resource = self.resource.try_duplicate().map_err(AdoptError::Resource)?;
        let releaser = self.releaser.try_duplicate().map_err(AdoptError::Releaser)?;

        Ok(Self {
            resource,
            releaser,
            armed: mem::replace(&mut self.armed, false),
        })
    }

    /// Release what `self` owns, then take over `source`'s obligation
    ///
    /// Moving the resource out cannot fail but copying the releaser can,
    /// so the releaser goes first: if its copy fails, `source` is untouched
    /// and keeps its obligation while `self` stays disarmed.
    pub fn try_assign_from(&mut self, source: &mut Self) -> Result<(), D::Error>
    where
        R: Default,
        D: TryHold<D>,
    {
        self.reset();

        self.releaser.try_assign_from(source.releaser.get())?;
        self.resource.assign(source.resource.take());
        self.armed = mem::replace(&mut source.armed, false);
        Ok(())
    }

    /// Release what `self` owns, then take over copies of `source`'s parts
    ///
    /// The resource is copied first, then the releaser. `source` is only
    /// disarmed after both copies succeed; on failure it keeps its
    /// obligation and `self` stays disarmed.
    pub fn try_assign_copied_from(
        &mut self,
        source: &mut Self,
    ) -> AdoptResult<(), <R as TryHold<R>>::Error, <D as TryHold<D>>::Error>
    where
        R: TryHold<R>,
        D: TryHold<D>,
    {
        self.reset();

        self.resource
            .try_assign_from(source.resource.get())
            .map_err(AdoptError::Resource)?;
        self.releaser
            .try_assign_from(source.releaser.get())
            .map_err(AdoptError::Releaser)?;
        self.armed = mem::replace(&mut source.armed, false);
        Ok(())
    }
}
