// tests/supervisor_lifecycle.rs

#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;

use sardine_bridge::errors::RelayError;
use sardine_bridge::relay::{SessionEvent, SpawnOptions, Supervisor};
use sardine_bridge_test_utils::{init_tracing, with_timeout};
use tempfile::{tempdir, TempDir};
use tokio::sync::mpsc;

type TestResult = Result<(), Box<dyn Error>>;

/// Write a fake `sardine` executable into a fresh temp dir and return
/// spawn options pointing at that dir.
fn fake_sardine(script_body: &str) -> Result<(TempDir, SpawnOptions), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("sardine");
    fs::write(&path, format!("#!/bin/sh\n{script_body}"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    let options = SpawnOptions {
        sardine_path: Some(dir.path().to_string_lossy().into_owned()),
        sclang_path: None,
    };
    Ok((dir, options))
}

/// An interpreter stand-in that echoes stdin back on stdout.
fn echoing_sardine() -> Result<(TempDir, SpawnOptions), Box<dyn Error>> {
    fake_sardine("exec cat\n")
}

async fn collect_stdout_until(
    events_rx: &mut mpsc::Receiver<SessionEvent>,
    needle: &str,
) -> String {
    let mut collected = String::new();
    loop {
        match with_timeout(events_rx.recv()).await {
            Some(SessionEvent::Stdout(chunk)) => {
                collected.push_str(&chunk);
                if collected.contains(needle) {
                    return collected;
                }
            }
            Some(_) => {}
            None => panic!("event channel closed while waiting for {needle:?}"),
        }
    }
}

#[tokio::test]
async fn send_without_start_is_rejected() -> TestResult {
    init_tracing();
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(SpawnOptions::default(), events_tx);
    assert!(!supervisor.is_running());
    assert_eq!(
        supervisor.send("d1 >> play()").await,
        Err(RelayError::ProcessNotRunning)
    );
    Ok(())
}

#[tokio::test]
async fn spawn_failure_reports_executable() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(
        SpawnOptions {
            // A directory with no `sardine` inside: resolution succeeds,
            // spawning fails.
            sardine_path: Some(dir.path().to_string_lossy().into_owned()),
            sclang_path: None,
        },
        events_tx,
    );
    match supervisor.start().await {
        Err(RelayError::SpawnFailed(msg)) => assert!(msg.contains("sardine")),
        other => panic!("expected SpawnFailed, got {other:?}"),
    }
    assert!(!supervisor.is_running());
    Ok(())
}

#[tokio::test]
async fn sent_text_reaches_stdin_with_blank_line_terminator() -> TestResult {
    init_tracing();
    let (_dir, options) = echoing_sardine()?;
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    assert!(supervisor.is_running());
    supervisor.send("x = 1").await?;

    let echoed = collect_stdout_until(&mut events_rx, "x = 1\n\n").await;
    assert!(echoed.contains("x = 1\n\n"));

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn child_environment_carries_overrides() -> TestResult {
    init_tracing();
    let (_dir, mut options) = fake_sardine("echo \"$PYTHONIOENCODING $sclang\"\nexec cat\n")?;
    options.sclang_path = Some("/opt/sclang".to_string());
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    let seen = collect_stdout_until(&mut events_rx, "utf-8 /opt/sclang").await;
    assert!(seen.contains("utf-8 /opt/sclang"));

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn start_is_idempotent_while_running() -> TestResult {
    init_tracing();
    let (_dir, options) = echoing_sardine()?;
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    let pid = supervisor.pid();
    supervisor.start().await?;
    assert_eq!(supervisor.pid(), pid);

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn concurrent_starts_launch_one_process() -> TestResult {
    init_tracing();
    // Each launch appends a line before turning into `cat`.
    let (dir, options) = fake_sardine("echo run >> \"$(dirname \"$0\")/launches\"\nexec cat\n")?;
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    let (a, b) = tokio::join!(supervisor.start(), supervisor.start());
    a?;
    b?;
    assert!(supervisor.is_running());

    let launches = fs::read_to_string(dir.path().join("launches"))?;
    assert_eq!(launches.lines().count(), 1);

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn stop_kills_the_process_and_reports_exit() -> TestResult {
    init_tracing();
    let (_dir, options) = echoing_sardine()?;
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    supervisor.stop();

    loop {
        match with_timeout(events_rx.recv()).await {
            Some(SessionEvent::Exited { code, generation }) => {
                // Killed by signal, so there is no exit code.
                assert_eq!(code, None);
                supervisor.mark_exited(generation);
                break;
            }
            Some(_) => {}
            None => panic!("event channel closed before exit event"),
        }
    }
    assert!(!supervisor.is_running());
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_code_is_reported() -> TestResult {
    init_tracing();
    let (_dir, options) = fake_sardine("exit 3\n")?;
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    loop {
        match with_timeout(events_rx.recv()).await {
            Some(SessionEvent::Exited { code, generation }) => {
                assert_eq!(code, Some(3));
                supervisor.mark_exited(generation);
                break;
            }
            Some(_) => {}
            None => panic!("event channel closed before exit event"),
        }
    }
    assert!(!supervisor.is_running());
    Ok(())
}

#[tokio::test]
async fn restart_after_exit_works() -> TestResult {
    init_tracing();
    let (_dir, options) = echoing_sardine()?;
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    supervisor.stop();
    loop {
        if let Some(SessionEvent::Exited { generation, .. }) =
            with_timeout(events_rx.recv()).await
        {
            supervisor.mark_exited(generation);
            break;
        }
    }

    supervisor.start().await?;
    assert!(supervisor.is_running());
    supervisor.send("again").await?;
    let echoed = collect_stdout_until(&mut events_rx, "again\n\n").await;
    assert!(echoed.contains("again\n\n"));

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn stale_exit_event_does_not_clear_a_restarted_process() -> TestResult {
    init_tracing();
    let (_dir, options) = echoing_sardine()?;
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(options, events_tx);

    supervisor.start().await?;
    // An exit event carrying an older generation must be ignored.
    assert!(!supervisor.mark_exited(u64::MAX));
    assert!(supervisor.is_running());

    supervisor.stop();
    Ok(())
}

#[tokio::test]
async fn full_executable_path_is_used_verbatim() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let script = dir.path().join("sardine");
    fs::write(&script, "#!/bin/sh\nexec cat\n")?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    // Already ends with /sardine, so the locator must not append again.
    let (events_tx, _events_rx) = mpsc::channel(16);
    let supervisor = Supervisor::new(
        SpawnOptions {
            sardine_path: Some(script.to_string_lossy().into_owned()),
            sclang_path: None,
        },
        events_tx,
    );
    supervisor.start().await?;
    assert!(supervisor.is_running());
    supervisor.stop();
    Ok(())
}
