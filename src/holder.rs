/*!
 * Holders
 *
 * Single-value boxes with all-or-nothing construction and assignment
 */

use crate::traits::{Action, TryHold};
use std::mem;

/// Box for exactly one value of type `T`
///
/// A holder is never empty: it is built from a complete value and every
/// mutation replaces that value as a whole. Moving a holder is a Rust move
/// and cannot fail. When the value has to come from a borrowed source
/// instead, the copy goes through [`TryHold`], and a failed copy leaves
/// both the source and the holder untouched.
///
/// `T` may be a reference (`Holder<&'a U>`), in which case the holder is a
/// non-owning handle to the referent.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Holder<T> {
    value: T,
}

impl<T> Holder<T> {
    /// Create a holder that owns `value`
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Create a holder from a copy of `source`
    ///
    /// Either the holder is fully built or the copy error is returned;
    /// `source` is left untouched in both cases.
    #[inline]
    pub fn try_hold_from<U>(source: &U) -> Result<Self, U::Error>
    where
        U: TryHold<T> + ?Sized,
    {
        Ok(Self::new(source.try_hold()?))
    }

    /// Create a new holder from a copy of this one's value
    #[inline]
    pub fn try_duplicate(&self) -> Result<Self, T::Error>
    where
        T: TryHold<T>,
    {
        Self::try_hold_from(&self.value)
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Replace the held value, dropping the previous one
    #[inline]
    pub fn assign(&mut self, value: T) {
        self.value = value;
    }

    /// Replace the held value with a copy of `source`
    ///
    /// The held value only changes once the copy exists, so a failure
    /// leaves the previous value in place.
    pub fn try_assign_from<U>(&mut self, source: &U) -> Result<(), U::Error>
    where
        U: TryHold<T> + ?Sized,
    {
        let value = source.try_hold()?;
        self.value = value;
        Ok(())
    }

    /// Move the value out, leaving `T::default()` behind
    #[inline]
    pub fn take(&mut self) -> T
    where
        T: Default,
    {
        mem::take(&mut self.value)
    }
}

impl<T> From<T> for Holder<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Holder whose value is an [`Action`]
///
/// Used by scope guards. Invoking consumes the holder, so the held action
/// can run at most once.
#[derive(Debug)]
pub struct CallableHolder<F: Action> {
    inner: Holder<F>,
}

impl<F: Action> CallableHolder<F> {
    #[inline]
    pub const fn new(action: F) -> Self {
        Self {
            inner: Holder::new(action),
        }
    }

    /// Create a callable holder from a copy of `source`
    #[inline]
    pub fn try_hold_from<U>(source: &U) -> Result<Self, U::Error>
    where
        U: TryHold<F> + ?Sized,
    {
        Ok(Self {
            inner: Holder::try_hold_from(source)?,
        })
    }

    #[inline]
    pub fn get(&self) -> &F {
        self.inner.get()
    }

    #[inline]
    pub fn into_inner(self) -> F {
        self.inner.into_inner()
    }

    /// Run the held action
    #[inline]
    pub fn invoke(self) {
        self.inner.into_inner().invoke();
    }
}
