//! Child-process dispatcher implementation.

use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use uuid::Uuid;

use super::error::DispatchError;
use super::traits::Dispatcher;
use super::types::{InvocationHandle, OutputStream};
use crate::config::TranscoderConfig;

/// Runs the configured transcoder as `<program> <args...> --input <path>`.
pub struct ProcessDispatcher {
    config: TranscoderConfig,
}

impl ProcessDispatcher {
    /// Creates a new dispatcher with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a dispatcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Builds the argument list for one invocation.
    fn build_args(&self, input: &Path) -> Vec<String> {
        let mut args = self.config.args.clone();
        args.extend(["--input".to_string(), input.to_string_lossy().to_string()]);
        args
    }
}

/// Forwards each line of a child output channel to the log until EOF.
async fn relay<R>(reader: R, invocation: Uuid, stream: OutputStream)
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(reader).split(b'\n');

    loop {
        match segments.next_segment().await {
            Ok(Some(bytes)) => {
                let line = String::from_utf8_lossy(&bytes);
                let line = line.trim_end_matches('\r');
                match stream {
                    OutputStream::Stdout => {
                        tracing::info!(target: "transcoder", %invocation, stream = "stdout", "{}", line)
                    }
                    OutputStream::Stderr => {
                        tracing::error!(target: "transcoder", %invocation, stream = "stderr", "{}", line)
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%invocation, stream = %stream, error = %e, "Transcoder output relay stopped");
                break;
            }
        }
    }
}

impl Dispatcher for ProcessDispatcher {
    fn name(&self) -> &str {
        "process"
    }

    fn dispatch(&self, input: &Path) -> Result<InvocationHandle, DispatchError> {
        if !input.exists() {
            return Err(DispatchError::InputNotFound {
                path: input.to_path_buf(),
            });
        }

        let id = Uuid::new_v4();
        let program = self.config.program.to_string_lossy().to_string();
        let args = self.build_args(input);

        let mut command = Command::new(&self.config.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| DispatchError::SpawnFailed {
            program: program.clone(),
            source,
        })?;
        let pid = child.id();

        tracing::info!(
            invocation = %id,
            pid = ?pid,
            program = %program,
            input = %input.display(),
            "Transcoder started"
        );

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(relay(stdout, id, OutputStream::Stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(relay(stderr, id, OutputStream::Stderr));
        }

        // Reaps the child and records how it ended; nothing is retried.
        let exit = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    if status.success() {
                        tracing::info!(invocation = %id, %status, "Transcoder exited");
                    } else {
                        tracing::warn!(invocation = %id, %status, "Transcoder exited with failure");
                    }
                    Some(status)
                }
                Err(e) => {
                    tracing::warn!(invocation = %id, error = %e, "Failed to wait for transcoder");
                    None
                }
            }
        });

        Ok(InvocationHandle::new(id, pid, program, args, exit))
    }
}
