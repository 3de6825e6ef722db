// tests/core_loop.rs

use std::path::PathBuf;
use std::time::{Duration, Instant};

use forgewatch::engine::{CoreCommand, CoreLoop, RuntimeEvent};
use forgewatch::types::{ChangeEvent, ChangeKind};
use forgewatch_test_utils::builders::{
    WatchConfigBuilder, dir_created, dir_deleted, file_created, file_deleted, file_modified,
};
use forgewatch_test_utils::init_tracing;

const WINDOW: Duration = Duration::from_millis(1000);

fn c_project() -> CoreLoop {
    let config = WatchConfigBuilder::new("make")
        .root("/proj/src")
        .extensions(".c .h")
        .build();
    CoreLoop::new(config, WINDOW)
}

fn restart() -> CoreCommand {
    CoreCommand::RestartBuild {
        command: "make".to_string(),
    }
}

fn changes(events: Vec<ChangeEvent>) -> RuntimeEvent {
    RuntimeEvent::Changes(events)
}

#[test]
fn single_source_edit_restarts_once() {
    init_tracing();
    let mut core = c_project();
    let t0 = Instant::now();

    let step = core.step(changes(vec![file_modified("/proj/src", "main.c")]), t0);

    assert!(step.keep_running);
    assert_eq!(step.commands, vec![restart()]);
}

#[test]
fn editor_burst_yields_one_restart() {
    let mut core = c_project();
    let t0 = Instant::now();

    let first = core.step(
        changes(vec![
            file_created("/proj/src", ".main.c.swp"),
            file_modified("/proj/src", "main.c~"),
            file_modified("/proj/src", "main.c"),
        ]),
        t0,
    );
    let second = core.step(
        changes(vec![file_deleted("/proj/src", ".main.c.swp")]),
        t0 + Duration::from_millis(50),
    );

    assert_eq!(first.commands, vec![restart()]);
    assert!(second.commands.is_empty());
}

#[test]
fn unwatched_extension_is_ignored() {
    let mut core = c_project();

    let step = core.step(
        changes(vec![file_modified("/proj/src", "README.md")]),
        Instant::now(),
    );

    assert!(step.commands.is_empty());
    assert!(step.keep_running);
}

#[test]
fn new_directory_is_enrolled_and_does_not_trigger() {
    let mut core = c_project();
    let t0 = Instant::now();

    let step = core.step(changes(vec![dir_created("/proj/src", "sub")]), t0);
    assert_eq!(
        step.commands,
        vec![CoreCommand::EnrollDirectory(PathBuf::from("/proj/src/sub"))]
    );

    let step = core.step(
        changes(vec![file_created("/proj/src/sub", "util.c")]),
        t0 + Duration::from_millis(10),
    );
    assert_eq!(step.commands, vec![restart()]);
}

#[test]
fn window_reopens_after_it_elapses() {
    let mut core = c_project();
    let t0 = Instant::now();
    let edit = || changes(vec![file_modified("/proj/src", "main.c")]);

    assert_eq!(core.step(edit(), t0).commands.len(), 1);
    assert!(core.step(edit(), t0 + Duration::from_millis(999)).commands.is_empty());
    assert_eq!(core.step(edit(), t0 + WINDOW).commands.len(), 1);
}

#[test]
fn one_restart_per_batch_at_most_inside_a_window() {
    let mut core = c_project();

    let step = core.step(
        changes(vec![
            file_modified("/proj/src", "a.c"),
            file_modified("/proj/src", "b.h"),
            file_created("/proj/src", "c.c"),
        ]),
        Instant::now(),
    );

    assert_eq!(step.commands, vec![restart()]);
}

#[test]
fn events_about_the_directory_itself_are_skipped() {
    let mut core = c_project();

    let step = core.step(
        changes(vec![ChangeEvent::new(
            "/proj/src",
            "",
            false,
            ChangeKind::Modified,
        )]),
        Instant::now(),
    );

    assert!(step.commands.is_empty());
}

#[test]
fn deleted_directory_does_nothing() {
    let mut core = c_project();

    let step = core.step(changes(vec![dir_deleted("/proj/src", "gen.c")]), Instant::now());

    assert!(step.commands.is_empty());
}

#[test]
fn dotted_directory_is_still_enrolled() {
    let mut core = c_project();

    let step = core.step(changes(vec![dir_created("/proj/src", ".cache")]), Instant::now());

    assert_eq!(
        step.commands,
        vec![CoreCommand::EnrollDirectory(PathBuf::from("/proj/src/.cache"))]
    );
}

#[test]
fn other_kind_never_triggers() {
    let mut core = c_project();

    let step = core.step(
        changes(vec![ChangeEvent::new(
            "/proj/src",
            "main.c",
            false,
            ChangeKind::Other,
        )]),
        Instant::now(),
    );

    assert!(step.commands.is_empty());
}

#[test]
fn deletion_of_a_watched_file_triggers() {
    let mut core = c_project();

    let step = core.step(changes(vec![file_deleted("/proj/src", "old.h")]), Instant::now());

    assert_eq!(step.commands, vec![restart()]);
}

#[test]
fn without_an_allow_list_every_non_noise_file_triggers() {
    let config = WatchConfigBuilder::new("make").root("/proj").build();
    let mut core = CoreLoop::new(config, WINDOW);

    let step = core.step(changes(vec![file_modified("/proj", "Makefile")]), Instant::now());
    assert_eq!(step.commands, vec![restart()]);
}

#[test]
fn initial_build_opens_the_first_window() {
    let mut core = c_project();
    let t0 = Instant::now();

    let initial = core.initial_build(t0);
    assert_eq!(initial.commands, vec![restart()]);
    assert!(initial.keep_running);

    let step = core.step(
        changes(vec![file_modified("/proj/src", "main.c")]),
        t0 + Duration::from_millis(200),
    );
    assert!(step.commands.is_empty());
}

#[test]
fn shutdown_and_backend_failure_stop_the_loop() {
    let mut core = c_project();
    let now = Instant::now();

    let step = core.step(RuntimeEvent::ShutdownRequested, now);
    assert!(!step.keep_running);
    assert!(step.commands.is_empty());

    let step = core.step(RuntimeEvent::BackendFailed("queue overflow".into()), now);
    assert!(!step.keep_running);
}
