//! Lifecycle controller tests

use dip_application::{Application, Injection};
use dip_domain::{Error, Instance, LifecycleState, Phase, ProviderSpec, instance};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type ModuleSpec = ProviderSpec<Instance>;
type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

fn push(log: &Log, entry: &str) {
    log.lock().unwrap().push(entry.to_string());
}

#[test]
fn test_run_queue_keeps_fifo_order() {
    let app = Application::new("lifecycle-fifo");
    let log = new_log();
    for entry in ["A", "B", "C"] {
        let log = Arc::clone(&log);
        app.run(&[], move |_| {
            push(&log, entry);
            Ok(())
        })
        .expect("enqueue");
    }

    app.start().expect("start");

    assert_eq!(entries(&log), ["A", "B", "C"]);
}

#[test]
fn test_phases_drain_in_order() {
    let app = Application::new("lifecycle-phases");
    let log = new_log();

    let l = Arc::clone(&log);
    app.inject(&[], move |_| {
        push(&l, "inject");
        Ok(())
    })
    .expect("inject");
    let l = Arc::clone(&log);
    app.run(&[], move |_| {
        push(&l, "run");
        Ok(())
    })
    .expect("run");
    let l = Arc::clone(&log);
    app.config(&[], move |_| {
        push(&l, "config");
        Ok(())
    })
    .expect("config");
    let l = Arc::clone(&log);
    app.module(
        "module",
        ModuleSpec::factory(move |_| {
            push(&l, "module");
            Ok(instance(()))
        }),
    )
    .expect("module");
    let l = Arc::clone(&log);
    app.view(
        "panel",
        ProviderSpec::new().with_factory(move |_| {
            push(&l, "view");
            let constructor: dip_domain::ViewConstructor =
                Arc::new(|_: &dip_domain::ViewContext| -> dip_domain::Result<()> { Ok(()) });
            Ok(constructor)
        }),
    )
    .expect("view");

    app.start().expect("start");

    assert_eq!(entries(&log), ["module", "config", "run", "view", "inject"]);
}

#[test]
fn test_tasks_receive_resolved_modules() {
    let app = Application::new("lifecycle-deps");
    let seen = Arc::new(Mutex::new(None));
    app.module("name", ModuleSpec::factory(|_| Ok(instance("Ada".to_string()))))
        .expect("module");

    let s = Arc::clone(&seen);
    app.config(&["name", "ghost"], move |args| {
        let name = args.get::<String>(0).map(|n| (*n).clone());
        let ghost_missing = args.resolved(1).is_some_and(|r| r.is_missing());
        *s.lock().unwrap() = Some((name, ghost_missing));
        Ok(())
    })
    .expect("config");

    app.start().expect("start");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, Some((Some("Ada".to_string()), true)));
}

#[test]
fn test_queue_closes_after_start() {
    let app = Application::new("lifecycle-closed");
    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    app.run(&[], move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("run before start");

    app.start().expect("start");
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let run = app.run(&[], |_| Ok(()));
    let config = app.config(&[], |_| Ok(()));

    assert!(matches!(run, Err(Error::QueueClosed { phase: Phase::Run })));
    assert!(matches!(
        config,
        Err(Error::QueueClosed {
            phase: Phase::Config
        })
    ));
    assert_eq!(app.pending(), 0);
}

#[test]
fn test_second_start_is_a_no_op() {
    let app = Application::new("lifecycle-idempotent");
    let runs = Arc::new(AtomicUsize::new(0));
    let builds = Arc::new(AtomicUsize::new(0));

    let r = Arc::clone(&runs);
    app.run(&[], move |_| {
        r.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("run");
    let b = Arc::clone(&builds);
    app.module(
        "service",
        ModuleSpec::factory(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
            Ok(instance(()))
        }),
    )
    .expect("module");

    assert!(app.start().expect("first start"));
    assert!(!app.start().expect("second start"));

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(app.state(), LifecycleState::Ready);
}

#[test]
fn test_inject_is_deferred_until_ready() {
    let app = Application::new("lifecycle-inject-deferred");
    app.module("answer", ModuleSpec::factory(|_| Ok(instance(42_u32))))
        .expect("module");
    let seen = Arc::new(AtomicUsize::new(0));

    let s = Arc::clone(&seen);
    let injection = app
        .inject(&["answer"], move |args| {
            let answer = args.require::<u32>(0)?;
            s.store(*answer as usize, Ordering::SeqCst);
            Ok(*answer)
        })
        .expect("inject");

    assert!(injection.is_deferred());
    assert_eq!(app.pending_in(Phase::Inject), 1);
    assert_eq!(seen.load(Ordering::SeqCst), 0);

    app.start().expect("start");

    assert_eq!(seen.load(Ordering::SeqCst), 42);
}

#[test]
fn test_inject_runs_immediately_when_ready() {
    let app = Application::new("lifecycle-inject-now");
    app.module("answer", ModuleSpec::factory(|_| Ok(instance(42_u32))))
        .expect("module");
    app.start().expect("start");

    let injection = app
        .inject(&["answer"], |args| Ok(*args.require::<u32>(0)? + 1))
        .expect("inject");

    assert_eq!(injection, Injection::Completed(43));
    assert_eq!(app.pending(), 0);
}

#[test]
fn test_override_start_skips_queues() {
    let app = Application::new("lifecycle-override");
    let counter = Arc::new(AtomicUsize::new(0));
    for phase in [Phase::Config, Phase::Run] {
        let c = Arc::clone(&counter);
        let task = move |_: &dip_domain::Args<Instance>| -> dip_domain::Result<()> {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };
        match phase {
            Phase::Config => app.config(&[], task),
            _ => app.run(&[], task),
        }
        .expect("enqueue");
    }
    let c = Arc::clone(&counter);
    app.inject(&[], move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("inject");
    let built = Arc::new(AtomicUsize::new(0));
    let b = Arc::clone(&built);
    app.module(
        "service",
        ModuleSpec::factory(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
            Ok(instance(()))
        }),
    )
    .expect("module");

    assert_eq!(app.pending(), 3);
    assert!(app.override_start().expect("override start"));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(app.pending(), 0);
    assert!(app.is_ready());
    assert!(!app.start().expect("start after override"));
}

#[test]
fn test_failed_start_returns_to_registering() {
    let app = Application::new("lifecycle-failure");
    let fail = Arc::new(AtomicUsize::new(1));

    let f = Arc::clone(&fail);
    app.module(
        "flaky",
        ModuleSpec::factory(move |_| {
            if f.load(Ordering::SeqCst) > 0 {
                return Err(Error::factory("flaky", "not yet"));
            }
            Ok(instance(()))
        }),
    )
    .expect("module");

    let err = app.start().expect_err("factory fails");
    assert!(matches!(err, Error::Factory { .. }));
    assert_eq!(app.state(), LifecycleState::Registering);

    app.run(&[], |_| Ok(())).expect("queue still open after failure");

    fail.store(0, Ordering::SeqCst);
    assert!(app.start().expect("retry"));
    assert!(app.is_ready());
}

#[test]
fn test_failed_task_is_not_replayed() {
    let app = Application::new("lifecycle-task-failure");
    let attempts = Arc::new(AtomicUsize::new(0));

    let a = Arc::clone(&attempts);
    app.run(&[], move |_| {
        a.fetch_add(1, Ordering::SeqCst);
        Err(Error::internal("run failed"))
    })
    .expect("run");

    assert!(app.start().is_err());
    assert_eq!(app.state(), LifecycleState::Registering);
    assert!(app.start().expect("retry"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_run_task_may_schedule_injection() {
    let app = Application::new("lifecycle-reentrant");
    let log = new_log();
    let handle = app.clone();

    let l = Arc::clone(&log);
    app.run(&[], move |_| {
        let l = Arc::clone(&l);
        handle.inject(&[], move |_| {
            push(&l, "late inject");
            Ok(())
        })?;
        Ok(())
    })
    .expect("run");

    app.start().expect("start");

    assert_eq!(entries(&log), ["late inject"]);
}
