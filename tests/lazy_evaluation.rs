use levelgate::{Arg, InMemoryBackend, Level, LevelMap, LogRecord, Registry};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

fn setup(threshold: Level) -> (Arc<InMemoryBackend>, Registry<Level>) {
    let backend = Arc::new(InMemoryBackend::with_threshold(threshold));
    let registry = Registry::new(backend.clone(), LevelMap::identity());
    (backend, registry)
}

#[derive(Debug, thiserror::Error)]
#[error("ex message")]
struct ExMessage;

#[test]
fn off_handle_never_runs_a_panicking_supplier() {
    let (backend, registry) = setup(Level::Trace);
    let off = registry.get("svc", Level::Off);

    off.log_lazy(|| -> String { panic!("supplier must not run") });
    off.log_args("{}", &[Arg::lazy(&|| -> String { panic!("supplier must not run") })]);
    off.log_err_lazy(&ExMessage, || -> String { panic!("supplier must not run") });

    assert_eq!(backend.write_count(), 0);
}

#[test]
fn disabled_level_makes_no_supplier_calls() {
    let (backend, registry) = setup(Level::Error);
    let calls = Cell::new(0);
    let counted = || {
        calls.set(calls.get() + 1);
        "expensive"
    };

    for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn] {
        let logger = registry.get("svc", level);
        assert!(!logger.is_enabled());
        logger.log_lazy(counted);
        logger.log_args(
            "{} {} {}",
            &[Arg::lazy(&counted), Arg::value(&"plain"), Arg::lazy(&counted)],
        );
        logger.log_err_args(&ExMessage, "{}", &[Arg::lazy(&counted)]);
    }

    assert_eq!(calls.get(), 0);
    assert_eq!(backend.write_count(), 0);
}

#[test]
fn debug_template_with_value_and_supplier() {
    let (backend, registry) = setup(Level::Debug);
    let debug = registry.get("svc", Level::Debug);
    let calls = Cell::new(0);
    let two = || {
        calls.set(calls.get() + 1);
        2
    };

    debug.log_args("x={}, y={}", &[Arg::value(&1), Arg::lazy(&two)]);

    assert_eq!(calls.get(), 1);
    assert_eq!(
        backend.drain_records(),
        [LogRecord::new(Level::Debug, "svc", "x=1, y=2")]
    );
}

#[test]
fn suppliers_run_left_to_right() {
    let (backend, registry) = setup(Level::Trace);
    let order = RefCell::new(Vec::new());
    let first = || {
        order.borrow_mut().push(1);
        "a"
    };
    let second = || {
        order.borrow_mut().push(2);
        "b"
    };
    let third = || {
        order.borrow_mut().push(3);
        "c"
    };

    registry.get("svc", Level::Warn).log_err_args(
        &ExMessage,
        "{} {} {} {}",
        &[
            Arg::lazy(&first),
            Arg::value(&"plain"),
            Arg::lazy(&second),
            Arg::lazy(&third),
        ],
    );

    assert_eq!(*order.borrow(), [1, 2, 3]);
    let records = backend.drain_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "a plain b c");
    assert_eq!(records[0].error.as_deref(), Some("ex message"));
}

#[test]
fn lazy_paths_recheck_after_reconfiguration() {
    let (backend, registry) = setup(Level::Error);
    let calls = Cell::new(0);
    let counted = || {
        calls.set(calls.get() + 1);
        "now"
    };
    let info = registry.get_default("svc");

    info.log_lazy(counted);
    assert_eq!(calls.get(), 0);

    backend.set_threshold(Level::Trace);
    info.log_lazy(counted);
    assert_eq!(calls.get(), 1);
    assert_eq!(backend.drain_logs(), "now");
}

#[test]
fn immutability_walkthrough() {
    let (backend, registry) = setup(Level::Info);
    let logger = registry.get_default("walkthrough");
    let error = logger.at_error();
    error.log("this is an immutable logger instance whose level is ERROR");
    error.log_err_msg(&ExMessage, "level omitted but it is ERROR");
    error.at_warn().log_err_args(
        &ExMessage,
        "switched to WARN on the fly: {} returns a {} logger",
        &[Arg::value(&"at_warn()"), Arg::value(&"different")],
    );
    let item = || "i22222";
    error.log_err_args(
        &ExMessage,
        "item1 {}, item2 {}",
        &[Arg::value(&"i11111"), Arg::lazy(&item)],
    );
    assert_eq!(error.level(), Level::Error);

    let levels: Vec<Level> = backend.drain_records().iter().map(|r| r.level).collect();
    assert_eq!(
        levels,
        [Level::Error, Level::Error, Level::Warn, Level::Error]
    );
}
