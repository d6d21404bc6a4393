//! Advice providers

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{HearthError, HearthResult};

/// Something that turns a prompt into raw model output
pub trait AdviceProvider {
    fn complete(&self, prompt: &str) -> HearthResult<String>;
}

/// Runs a shell command with the prompt on stdin and reads the answer from stdout
///
/// Any model client that speaks stdin/stdout can sit behind this, e.g. a
/// small script calling a hosted API.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: String,
}

impl CommandProvider {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn shell(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl AdviceProvider for CommandProvider {
    fn complete(&self, prompt: &str) -> HearthResult<String> {
        let mut child = self
            .shell()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HearthError::Advisor(format!("failed to start `{}`: {}", self.command, e)))?;

        // The prompt is written while stdout is drained so neither pipe fills up
        let stdin = child.stdin.take();
        let (output, sent) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(prompt.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let sent = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("prompt writer panicked")));
            (output, sent)
        });

        let output =
            output.map_err(|e| HearthError::Advisor(format!("advisor command failed: {}", e)))?;
        match sent {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                return Err(HearthError::Advisor(format!("failed to send prompt: {}", e)));
            }
            Err(_) => tracing::debug!("advisor command closed stdin before reading the whole prompt"),
            Ok(()) => {}
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HearthError::Advisor(format!(
                "advisor command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| HearthError::Advisor(format!("advisor output is not UTF-8: {}", e)))
    }
}
