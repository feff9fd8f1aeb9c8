//! One bounded child process per agent call.

use crate::agents::{AgentAdapter, Invocation};
use council_domain::{AgentResponse, FailureKind, Prompt};
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How long a timed-out process gets between SIGTERM and SIGKILL.
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(2);

/// Spawns agent CLIs and turns every outcome into an [`AgentResponse`].
///
/// Each call owns exactly one child. The child runs in its own process
/// group; the whole group is killed when the call returns or its future is
/// dropped, and on Linux the child receives SIGTERM if this process dies.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    kill_grace: Duration,
    working_dir: Option<PathBuf>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self {
            kill_grace: DEFAULT_KILL_GRACE,
            working_dir: None,
        }
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    /// Run children in `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Invoke `adapter` with `prompt`, bounded by `timeout`.
    ///
    /// Never returns an error: spawn failures, timeouts, non-zero exits and
    /// unparseable output all come back as failed responses.
    pub async fn invoke(
        &self,
        adapter: &AgentAdapter,
        prompt: &Prompt,
        timeout: Duration,
    ) -> AgentResponse {
        let started = Instant::now();
        let invocation = adapter.build_invocation(prompt);
        let response = self.run(adapter, invocation, timeout).await;
        response.with_duration(started.elapsed())
    }

    async fn run(
        &self,
        adapter: &AgentAdapter,
        invocation: Invocation,
        timeout: Duration,
    ) -> AgentResponse {
        let name = adapter.name();
        let mut group = match self.spawn(&invocation) {
            Ok(child) => ProcessGroup::new(child),
            Err(e) => {
                warn!("Failed to spawn {}: {}", invocation.program.display(), e);
                return AgentResponse::failure(
                    name,
                    FailureKind::SpawnFailure,
                    spawn_error_message(&invocation, &e),
                );
            }
        };
        debug!(
            "Spawned {} (pid {:?}) for {}",
            invocation.program.display(),
            group.child.id(),
            name
        );

        let stdin_pipe = group.child.stdin.take();
        let stdout_pipe = group.child.stdout.take();
        let stderr_pipe = group.child.stderr.take();
        let payload = invocation.stdin;

        let completed = tokio::time::timeout(timeout, async {
            let (_, stdout, stderr) = tokio::join!(
                write_stdin(stdin_pipe, payload),
                read_pipe(stdout_pipe),
                read_pipe(stderr_pipe),
            );
            let status = group.child.wait().await;
            (status, stdout, stderr)
        })
        .await;

        match completed {
            Ok((Ok(status), stdout, stderr)) => {
                debug!("{} exited with {}", name, status);
                if status.success() {
                    adapter.parse_output(&stdout, status.code())
                } else {
                    AgentResponse::failure(
                        name,
                        FailureKind::NonZeroExit,
                        exit_message(status, &stdout, &stderr),
                    )
                }
            }
            Ok((Err(e), _, _)) => {
                warn!("Failed to wait on {}: {}", name, e);
                AgentResponse::failure(
                    name,
                    FailureKind::SpawnFailure,
                    format!("failed to wait on child: {}", e),
                )
            }
            Err(_) => {
                warn!("{} timed out after {:?}, terminating", name, timeout);
                self.terminate(&mut group.child).await;
                AgentResponse::failure(
                    name,
                    FailureKind::Timeout,
                    format!("timeout after {}", format_secs(timeout)),
                )
            }
        }
    }

    fn spawn(&self, invocation: &Invocation) -> io::Result<Child> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        // Own process group, so a timeout can signal the whole tree.
        #[cfg(unix)]
        cmd.process_group(0);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd.spawn()
    }

    /// SIGTERM the child's process group, then SIGKILL after the grace window.
    async fn terminate(&self, child: &mut Child) {
        #[cfg(unix)]
        {
            if let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
                unsafe {
                    libc::kill(-pid, libc::SIGTERM);
                }
                let exited = tokio::time::timeout(self.kill_grace, child.wait())
                    .await
                    .is_ok();
                // Stragglers left in the group go too.
                unsafe {
                    libc::kill(-pid, libc::SIGKILL);
                }
                if exited {
                    debug!("pid {} exited after SIGTERM", pid);
                    return;
                }
            }
        }

        if let Err(e) = child.kill().await {
            debug!("kill after timeout: {}", e);
        }
    }
}

/// Owns a spawned child. Dropping it SIGKILLs the child's process group,
/// so nothing the agent started outlives the call, cancelled or not.
struct ProcessGroup {
    child: Child,
    #[cfg(unix)]
    pgid: Option<i32>,
}

impl ProcessGroup {
    fn new(child: Child) -> Self {
        Self {
            #[cfg(unix)]
            pgid: child.id().and_then(|pid| i32::try_from(pid).ok()),
            child,
        }
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            if let Some(pgid) = self.pgid {
                // ESRCH once the group is empty is expected.
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
        }
    }
}

async fn write_stdin(pipe: Option<tokio::process::ChildStdin>, payload: Option<String>) {
    if let (Some(mut pipe), Some(payload)) = (pipe, payload) {
        if let Err(e) = pipe.write_all(payload.as_bytes()).await {
            debug!("Writing prompt to stdin failed: {}", e);
        }
        // Dropping the pipe closes the child's stdin.
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe
        && let Err(e) = pipe.read_to_end(&mut buf).await
    {
        debug!("Reading child output failed: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn spawn_error_message(invocation: &Invocation, error: &io::Error) -> String {
    let program = invocation.program.display();
    match error.kind() {
        io::ErrorKind::NotFound => format!("CLI not found: {}", program),
        io::ErrorKind::PermissionDenied => format!("CLI not executable: {}", program),
        _ => format!("{}: {}", program, error),
    }
}

/// `Exit code N: <stderr, or stdout when stderr is empty>`.
fn exit_message(status: ExitStatus, stdout: &str, stderr: &str) -> String {
    let head = match status.code() {
        Some(code) => format!("Exit code {}", code),
        None => "Terminated by signal".to_string(),
    };
    let detail = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };
    if detail.is_empty() {
        head
    } else {
        format!("{}: {}", head, detail)
    }
}

fn format_secs(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
