// tests/supervisor.rs

use forgewatch::exec::{BuildSupervisor, SupervisorState};
use forgewatch_test_utils::fake_launcher::FakeLauncher;
use forgewatch_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn first_restart_just_starts() {
    init_tracing();
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    assert_eq!(supervisor.state(), SupervisorState::Idle);
    supervisor.restart("make").await;

    assert_eq!(launcher.started(), vec!["make".to_string()]);
    assert!(launcher.terminated().is_empty());
    assert_eq!(supervisor.state(), SupervisorState::Running);
    assert!(supervisor.has_child());
}

#[tokio::test]
async fn restart_reaps_the_previous_build_before_starting() {
    init_tracing();
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    for _ in 0..5 {
        supervisor.restart("make run").await;
    }

    assert_eq!(launcher.start_count(), 5);
    assert_eq!(launcher.terminated(), vec![1, 2, 3, 4]);
    assert_eq!(launcher.reaped(), vec![1, 2, 3, 4]);
    assert_eq!(launcher.live_count(), 1);
    assert_eq!(launcher.max_live(), 1);
}

#[tokio::test]
async fn build_that_already_exited_is_reported_not_signalled() {
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    supervisor.restart("make").await;
    launcher.exit_child(1, 2);
    supervisor.restart("make").await;

    assert!(launcher.terminated().is_empty());
    assert_eq!(launcher.reaped(), vec![1]);
    assert_eq!(launcher.last_id(), Some(2));
    assert_eq!(launcher.max_live(), 1);
}

#[tokio::test]
async fn failed_start_leaves_idle_and_the_next_trigger_retries() {
    init_tracing();
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    launcher.fail_next_starts(1);
    supervisor.restart("make").await;

    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert!(!supervisor.has_child());
    assert_eq!(launcher.start_count(), 0);

    supervisor.restart("make").await;
    assert_eq!(supervisor.state(), SupervisorState::Running);
    assert_eq!(launcher.start_count(), 1);
}

#[tokio::test]
async fn shutdown_is_idempotent_and_blocks_further_starts() {
    init_tracing();
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    supervisor.restart("make").await;
    supervisor.shutdown().await;
    supervisor.shutdown().await;

    assert!(supervisor.is_shut_down());
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert_eq!(launcher.terminated(), vec![1]);
    assert_eq!(launcher.live_count(), 0);

    supervisor.restart("make").await;
    assert_eq!(launcher.start_count(), 1);
    assert!(!supervisor.has_child());
}

#[tokio::test]
async fn shutdown_without_a_build_does_nothing() {
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    supervisor.shutdown().await;

    assert!(launcher.terminated().is_empty());
    assert!(supervisor.is_shut_down());
}

#[cfg(unix)]
mod shell {
    use forgewatch::exec::{
        BuildSupervisor, NESTED_MARKER_VAR, ProcessLauncher, ShellLauncher, SupervisorState,
    };
    use forgewatch_test_utils::{init_tracing, with_timeout};

    #[tokio::test]
    async fn exit_code_is_reported() -> anyhow::Result<()> {
        let mut launcher = ShellLauncher::new();
        let child = launcher.start("exit 3")?;
        let report = with_timeout(launcher.wait(child)).await?;

        assert_eq!(report.code, Some(3));
        assert!(!report.success);
        Ok(())
    }

    #[tokio::test]
    async fn child_sees_the_nesting_marker() -> anyhow::Result<()> {
        let mut launcher = ShellLauncher::new();
        let script = format!("[ \"${NESTED_MARKER_VAR}\" = 1 ]");
        let child = launcher.start(&script)?;
        let report = with_timeout(launcher.wait(child)).await?;

        assert!(report.success);
        Ok(())
    }

    #[tokio::test]
    async fn stopped_build_is_still_terminated() -> anyhow::Result<()> {
        let mut launcher = ShellLauncher::new();
        let mut child = launcher.start("sleep 30")?;
        let pid = launcher.child_id(&child).expect("running child has a pid");

        // Same effect as a background build stopped by SIGTTOU.
        let rc = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGSTOP) };
        assert_eq!(rc, 0);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        launcher.terminate(&mut child)?;
        let report = with_timeout(launcher.wait(child)).await?;

        assert!(!report.success);
        assert_eq!(report.code, None);
        Ok(())
    }

    #[tokio::test]
    async fn long_running_build_is_terminated_on_restart_and_shutdown() {
        init_tracing();
        let mut supervisor = BuildSupervisor::new(ShellLauncher::new());

        supervisor.restart("sleep 30").await;
        assert_eq!(supervisor.state(), SupervisorState::Running);

        // Both calls must return well before the sleep would end.
        with_timeout(supervisor.restart("sleep 30")).await;
        assert!(supervisor.has_child());

        with_timeout(supervisor.shutdown()).await;
        assert!(!supervisor.has_child());
        assert_eq!(supervisor.state(), SupervisorState::Idle);
    }
}

#[tokio::test]
async fn restart_completes_promptly_with_fakes() {
    let launcher = FakeLauncher::new();
    let mut supervisor = BuildSupervisor::new(launcher.clone());

    with_timeout(async {
        supervisor.restart("a").await;
        supervisor.restart("b").await;
    })
    .await;

    assert_eq!(launcher.started(), vec!["a".to_string(), "b".to_string()]);
}
