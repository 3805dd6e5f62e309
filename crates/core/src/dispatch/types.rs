use std::fmt;
use std::process::ExitStatus;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Which output channel a relayed line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A launched transcoder invocation.
///
/// Dropping the handle detaches from the process; it keeps running.
#[derive(Debug)]
pub struct InvocationHandle {
    pub id: Uuid,
    /// OS process id, if the process was still alive when queried.
    pub pid: Option<u32>,
    pub program: String,
    pub args: Vec<String>,
    exit: Option<JoinHandle<Option<ExitStatus>>>,
}

impl InvocationHandle {
    pub(crate) fn new(
        id: Uuid,
        pid: Option<u32>,
        program: String,
        args: Vec<String>,
        exit: JoinHandle<Option<ExitStatus>>,
    ) -> Self {
        Self {
            id,
            pid,
            program,
            args,
            exit: Some(exit),
        }
    }

    /// A handle with no process behind it (used by mocks).
    pub fn detached(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pid: None,
            program: program.into(),
            args,
            exit: None,
        }
    }

    /// Waits for the process to exit. Returns `None` if there is no process or
    /// its status could not be collected.
    pub async fn wait(self) -> Option<ExitStatus> {
        match self.exit {
            Some(exit) => exit.await.ok().flatten(),
            None => None,
        }
    }
}
