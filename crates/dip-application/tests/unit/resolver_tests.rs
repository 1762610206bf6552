//! Resolver tests

use dip_application::Application;
use dip_domain::{Error, Instance, ProviderSpec, Resolved, SpecEntry, instance};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

type ModuleSpec = ProviderSpec<Instance>;

fn counting_factory(counter: &Arc<AtomicUsize>) -> ModuleSpec {
    let counter = Arc::clone(counter);
    ModuleSpec::factory(move |_| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(instance(n))
    })
}

#[test]
fn test_dependency_is_injected() {
    let app = Application::new("resolver-greeter");
    app.module(
        "greeter",
        ModuleSpec::new().dependency("name").with_factory(|args| {
            let name = args.require::<String>(0)?;
            Ok(instance(format!("hi {name}")))
        }),
    )
    .expect("greeter registration");
    app.module("name", ModuleSpec::factory(|_| Ok(instance("Ada".to_string()))))
        .expect("name registration");

    app.start().expect("start");

    let greeting = app.get::<String>("greeter").expect("resolution");
    assert_eq!(greeting.as_deref().map(String::as_str), Some("hi Ada"));
}

#[test]
fn test_mixed_entries_are_normalized() {
    let app = Application::new("resolver-entries");
    app.module("name", ModuleSpec::factory(|_| Ok(instance("Ada".to_string()))))
        .expect("name registration");
    let entries: [SpecEntry<Instance>; 2] = [
        SpecEntry::from("name"),
        SpecEntry::factory(|args| {
            let name = args.require::<String>(0)?;
            Ok(instance(format!("hi {name}")))
        }),
    ];
    app.module("greeter", ModuleSpec::from_entries(entries))
        .expect("greeter registration");

    let greeting = app.get::<String>("greeter").expect("resolution");
    assert_eq!(greeting.as_deref().map(String::as_str), Some("hi Ada"));
}

#[test]
fn test_factory_runs_once() {
    let app = Application::new("resolver-memo");
    let counter = Arc::new(AtomicUsize::new(0));
    app.module("counted", counting_factory(&counter))
        .expect("registration");
    app.module(
        "first",
        ModuleSpec::new()
            .dependency("counted")
            .with_factory(|_| Ok(instance(()))),
    )
    .expect("registration");
    app.module(
        "second",
        ModuleSpec::new()
            .dependency("counted")
            .with_factory(|_| Ok(instance(()))),
    )
    .expect("registration");

    app.start().expect("start");
    app.resolve_module("counted").expect("resolution");
    app.resolve_module("first").expect("resolution");

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_resolved_value_is_shared() {
    let app = Application::new("resolver-identity");
    app.module("list", ModuleSpec::factory(|_| Ok(instance(vec![1, 2, 3]))))
        .expect("registration");

    let a = app.get::<Vec<i32>>("list").unwrap().expect("value");
    let b = app.get::<Vec<i32>>("list").unwrap().expect("value");

    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_unknown_name_is_missing() {
    let app = Application::new("resolver-missing");

    assert!(app.resolve_module("ghost").unwrap().is_missing());
    assert!(app.get::<String>("ghost").unwrap().is_none());
}

#[test]
fn test_missing_dependency_reaches_factory_as_absent() {
    let app = Application::new("resolver-missing-dep");
    app.module(
        "consumer",
        ModuleSpec::new().dependency("ghost").with_factory(|args| {
            let missing = args.resolved(0).is_some_and(Resolved::is_missing);
            Ok(instance(missing))
        }),
    )
    .expect("registration");

    app.start().expect("start");

    assert_eq!(app.get::<bool>("consumer").unwrap().as_deref(), Some(&true));
}

#[test]
fn test_require_reports_missing_dependency() {
    let app = Application::new("resolver-require");
    app.module(
        "strict",
        ModuleSpec::new().dependency("ghost").with_factory(|args| {
            let value = args.require::<String>(0)?;
            Ok(instance(value))
        }),
    )
    .expect("registration");

    let err = app.resolve_module("strict").expect_err("dependency is missing");

    assert!(matches!(err, Error::MissingDependency { position: 0 }));
    assert!(!app.get_module("strict").unwrap().is_resolved());
}

#[test]
fn test_provider_without_factory_is_empty_and_not_memoized() {
    let app = Application::new("resolver-empty");
    app.module("config", ModuleSpec::factory(|_| Ok(instance(1_u8))))
        .expect("registration");
    app.module("later", ModuleSpec::new().dependency("config"))
        .expect("registration");

    let first = app.resolve_module("later").expect("resolution");
    let second = app.resolve_module("later").expect("resolution");

    assert!(matches!(first, Resolved::Empty));
    assert!(matches!(second, Resolved::Empty));
    assert!(!app.get_module("later").unwrap().is_resolved());
    assert!(app.get_module("config").unwrap().is_resolved());
}

#[test]
fn test_last_factory_wins() {
    let app = Application::new("resolver-override");
    app.module(
        "mode",
        ModuleSpec::from_entries([
            SpecEntry::factory(|_| Ok(instance("first"))),
            SpecEntry::factory(|_| Ok(instance("second"))),
            SpecEntry::factory(|_| Ok(instance("third"))),
        ]),
    )
    .expect("registration");

    let mode = app.get::<&'static str>("mode").unwrap().expect("value");
    assert_eq!(*mode, "third");
}

#[test]
fn test_override_receives_preceding_dependencies() {
    let app = Application::new("resolver-override-args");
    app.module("base", ModuleSpec::factory(|_| Ok(instance(10_i64))))
        .expect("registration");
    app.module(
        "derived",
        ModuleSpec::new()
            .dependency("base")
            .with_factory(|_| Ok(instance(0_i64)))
            .with_override(|args| Ok(instance(*args.require::<i64>(0)? * 2))),
    )
    .expect("registration");

    assert_eq!(app.get::<i64>("derived").unwrap().as_deref(), Some(&20));
}

#[test]
fn test_factory_error_propagates() {
    let app = Application::new("resolver-error");
    app.module(
        "broken",
        ModuleSpec::factory(|_| Err(Error::factory("broken", "no backend"))),
    )
    .expect("registration");

    let err = app.resolve_module("broken").expect_err("factory fails");

    assert_eq!(err.to_string(), "Factory for broken failed: no backend");
    assert!(!app.get_module("broken").unwrap().is_resolved());
}

#[test]
fn test_factory_may_resolve_reentrantly() {
    let app = Application::new("resolver-reentrant");
    let handle = app.clone();
    app.module("inner", ModuleSpec::factory(|_| Ok(instance(3_u16))))
        .expect("registration");
    app.module(
        "outer",
        ModuleSpec::factory(move |_| {
            let inner = handle.get::<u16>("inner")?.map_or(0, |v| *v);
            Ok(instance(inner + 1))
        }),
    )
    .expect("registration");

    assert_eq!(app.get::<u16>("outer").unwrap().as_deref(), Some(&4));
}

#[test]
fn test_type_mismatch_is_reported() {
    let app = Application::new("resolver-mismatch");
    app.module("number", ModuleSpec::factory(|_| Ok(instance(1_u8))))
        .expect("registration");
    app.module(
        "text",
        ModuleSpec::new()
            .dependency("number")
            .with_factory(|args| Ok(instance(args.require::<String>(0)?))),
    )
    .expect("registration");

    let err = app.resolve_module("text").expect_err("wrong type");

    assert!(matches!(err, Error::TypeMismatch { position: 0, .. }));
    assert!(app.get::<String>("number").unwrap().is_none());
}

#[test]
fn test_concurrent_resolution_runs_factory_once() {
    let app = Application::new("resolver-concurrent");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    app.module(
        "slow",
        ModuleSpec::factory(move |_| {
            thread::sleep(Duration::from_millis(50));
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(instance(42_usize))
        }),
    )
    .expect("registration");

    let values: Vec<Arc<usize>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| app.get::<usize>("slow").unwrap().expect("value")))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(values.iter().all(|v| **v == 42));
    assert!(values.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}
