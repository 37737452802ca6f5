/*!
 * Unique Resource Construction Tests
 */

use crate::support::{init_logging, recorder, CopyError, FlakyReleaser, FlakyResource, Log};
use pretty_assertions::assert_eq;
use scopekit::{AdoptError, AdoptResult, UniqueResource};
use std::cell::RefCell;
use std::convert::Infallible;

#[test]
fn test_armed_resource_released_on_drop() {
    let log = Log::default();
    {
        let resource = UniqueResource::new(3u32, recorder(&log));
        assert!(resource.is_armed());
        assert_eq!(*resource.get(), 3);
    }
    assert_eq!(*log.borrow(), vec![3]);
}

#[test]
fn test_disarmed_parts_never_released() {
    let log = Log::default();
    {
        let resource = UniqueResource::from_parts(3u32, recorder(&log), false);
        assert!(!resource.is_armed());
    }
    assert!(log.borrow().is_empty());
}

#[test]
fn test_default_is_disarmed() {
    let resource: UniqueResource<u32, FlakyReleaserDefault> = UniqueResource::default();
    assert_eq!(*resource.get(), 0);
    assert!(!resource.is_armed());
}

#[derive(Default)]
struct FlakyReleaserDefault;

impl scopekit::Release<u32> for FlakyReleaserDefault {
    fn release(&mut self, _resource: &u32) {
        panic!("a default resource must never be released");
    }
}

#[test]
fn test_try_new_from_copies() {
    let log = Log::default();
    {
        let result: AdoptResult<UniqueResource<FlakyResource, FlakyReleaser>, _, _> =
            UniqueResource::try_new(
                FlakyResource::new(13, false),
                FlakyReleaser::new(&log, false),
                true,
            );
        let resource = result.unwrap();
        assert_eq!(resource.get().value, 13);
    }
    assert_eq!(*log.borrow(), vec![13]);
}

#[test]
fn test_resource_copy_failure_releases_nothing() {
    let log = Log::default();
    let result: AdoptResult<UniqueResource<FlakyResource, FlakyReleaser>, _, _> =
        UniqueResource::try_new(
            FlakyResource::new(42, true),
            FlakyReleaser::new(&log, false),
            true,
        );

    assert_eq!(result.unwrap_err(), AdoptError::Resource(CopyError));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_releaser_copy_failure_releases_with_callers_releaser() {
    init_logging();
    let log = Log::default();
    let result: AdoptResult<UniqueResource<u32, FlakyReleaser>, Infallible, CopyError> =
        UniqueResource::try_new(10u32, FlakyReleaser::new(&log, true), true);

    assert_eq!(result.unwrap_err(), AdoptError::Releaser(CopyError));
    assert_eq!(*log.borrow(), vec![10]);
}

#[test]
fn test_both_copies_failing_reports_resource() {
    let log = Log::default();
    let result: AdoptResult<UniqueResource<FlakyResource, FlakyReleaser>, _, _> =
        UniqueResource::try_new(
            FlakyResource::new(42, true),
            FlakyReleaser::new(&log, true),
            true,
        );

    assert_eq!(result.unwrap_err().into_inner(), CopyError);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_releaser_copy_failure_when_disarmed() {
    let log = Log::default();
    let result: AdoptResult<UniqueResource<u32, FlakyReleaser>, _, _> =
        UniqueResource::try_new(10u32, FlakyReleaser::new(&log, true), false);

    assert!(result.unwrap_err().is_releaser());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_reference_resource() {
    let released = RefCell::new(String::from("Hello"));
    let text = String::from(", world!");
    {
        let resource = UniqueResource::new(&text, |r: &&String| released.borrow_mut().push_str(r));
        assert!(std::ptr::eq(*resource.get(), &text));
    }
    assert_eq!(*released.borrow(), "Hello, world!");
}

#[test]
fn test_reference_releaser() {
    let log = Log::default();
    let mut releaser = recorder(&log);
    {
        let _a = UniqueResource::new(1u32, &mut releaser);
    }
    {
        let _b = UniqueResource::new(2u32, &mut releaser);
    }
    assert_eq!(*log.borrow(), vec![1, 2]);
}

#[test]
fn test_pointer_shaped_access() {
    let log = Log::default();
    let sink = log.clone();
    {
        let resource = UniqueResource::new(Box::new(String::from("hello")), move |b: &Box<String>| {
            sink.borrow_mut().push(b.len() as u32)
        });
        assert_eq!(*resource, "hello");
        assert_eq!(resource.len(), 5);
    }
    assert_eq!(*log.borrow(), vec![5]);
}

#[test]
fn test_debug_shows_resource_and_state() {
    let log = Log::default();
    let resource = UniqueResource::new(7u32, recorder(&log));
    let text = format!("{:?}", resource);
    assert!(text.contains("resource: 7"));
    assert!(text.contains("armed: true"));
}
