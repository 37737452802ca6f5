/*!
 * Shared test fixtures
 *
 * Recording releasers plus actions, releasers and resources whose copy
 * fails or panics on demand
 */

#![allow(dead_code)]

use scopekit::{Action, Release, TryHold};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

/// Ordered record of released values
pub type Log = Rc<RefCell<Vec<u32>>>;

/// Error raised by the flaky fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("copy failed")]
pub struct CopyError;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Releaser that appends every released value to `log`
pub fn recorder(log: &Log) -> impl FnMut(&u32) + Clone {
    let log = log.clone();
    move |value: &u32| log.borrow_mut().push(*value)
}

/// Action counting its invocations, with a copy that can fail
pub struct FlakyAction {
    pub calls: Rc<Cell<u32>>,
    pub fail: bool,
}

impl FlakyAction {
    pub fn new(calls: &Rc<Cell<u32>>, fail: bool) -> Self {
        Self {
            calls: calls.clone(),
            fail,
        }
    }
}

impl Action for FlakyAction {
    fn invoke(self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl TryHold<FlakyAction> for FlakyAction {
    type Error = CopyError;

    fn try_hold(&self) -> Result<FlakyAction, CopyError> {
        if self.fail {
            return Err(CopyError);
        }
        Ok(FlakyAction::new(&self.calls, false))
    }
}

/// Releaser appending to `log`, with a copy that can fail
pub struct FlakyReleaser {
    pub log: Log,
    pub fail: bool,
}

impl FlakyReleaser {
    pub fn new(log: &Log, fail: bool) -> Self {
        Self {
            log: log.clone(),
            fail,
        }
    }
}

impl Release<u32> for FlakyReleaser {
    fn release(&mut self, resource: &u32) {
        self.log.borrow_mut().push(*resource);
    }
}

impl Release<FlakyResource> for FlakyReleaser {
    fn release(&mut self, resource: &FlakyResource) {
        self.log.borrow_mut().push(resource.value);
    }
}

impl TryHold<FlakyReleaser> for FlakyReleaser {
    type Error = CopyError;

    fn try_hold(&self) -> Result<FlakyReleaser, CopyError> {
        if self.fail {
            return Err(CopyError);
        }
        Ok(FlakyReleaser::new(&self.log, false))
    }
}

/// Resource value with a copy that can fail
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FlakyResource {
    pub value: u32,
    pub fail: bool,
}

impl FlakyResource {
    pub fn new(value: u32, fail: bool) -> Self {
        Self { value, fail }
    }
}

impl TryHold<FlakyResource> for FlakyResource {
    type Error = CopyError;

    fn try_hold(&self) -> Result<FlakyResource, CopyError> {
        if self.fail {
            return Err(CopyError);
        }
        Ok(FlakyResource::new(self.value, false))
    }
}

impl PartialEq<u32> for FlakyResource {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

/// How a fixture's copy misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Succeeds,
    Panics,
}

/// Action counting its invocations, with a copy that may panic
pub struct PanickyAction {
    pub calls: Rc<Cell<u32>>,
    pub copy: CopyMode,
}

impl PanickyAction {
    pub fn new(calls: &Rc<Cell<u32>>, copy: CopyMode) -> Self {
        Self {
            calls: calls.clone(),
            copy,
        }
    }
}

impl Action for PanickyAction {
    fn invoke(self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl TryHold<PanickyAction> for PanickyAction {
    type Error = CopyError;

    fn try_hold(&self) -> Result<PanickyAction, CopyError> {
        if self.copy == CopyMode::Panics {
            panic!("action copy panicked");
        }
        Ok(PanickyAction::new(&self.calls, CopyMode::Succeeds))
    }
}

/// Releaser appending to `log`, with a copy that may panic
pub struct PanickyReleaser {
    pub log: Log,
    pub copy: CopyMode,
}

impl PanickyReleaser {
    pub fn new(log: &Log, copy: CopyMode) -> Self {
        Self {
            log: log.clone(),
            copy,
        }
    }
}

impl Release<u32> for PanickyReleaser {
    fn release(&mut self, resource: &u32) {
        self.log.borrow_mut().push(*resource);
    }
}

impl Release<PanickyResource> for PanickyReleaser {
    fn release(&mut self, resource: &PanickyResource) {
        self.log.borrow_mut().push(resource.value);
    }
}

impl TryHold<PanickyReleaser> for PanickyReleaser {
    type Error = CopyError;

    fn try_hold(&self) -> Result<PanickyReleaser, CopyError> {
        if self.copy == CopyMode::Panics {
            panic!("releaser copy panicked");
        }
        Ok(PanickyReleaser::new(&self.log, CopyMode::Succeeds))
    }
}

/// Resource value with a copy that may panic
#[derive(Debug, PartialEq, Eq)]
pub struct PanickyResource {
    pub value: u32,
    pub copy: CopyMode,
}

impl PanickyResource {
    pub fn new(value: u32, copy: CopyMode) -> Self {
        Self { value, copy }
    }
}

impl TryHold<PanickyResource> for PanickyResource {
    type Error = CopyError;

    fn try_hold(&self) -> Result<PanickyResource, CopyError> {
        if self.copy == CopyMode::Panics {
            panic!("resource copy panicked");
        }
        Ok(PanickyResource::new(self.value, CopyMode::Succeeds))
    }
}
