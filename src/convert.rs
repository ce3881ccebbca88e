use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

use crate::logger::log_command;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program} did not produce {}", .path.display())]
    MissingOutput { program: String, path: PathBuf },
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Run an external converter once, bounded by `timeout`. The child is
/// killed if the deadline passes.
pub async fn run_converter(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<(), ConvertError> {
    log_command(program, args);
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => {
            return Err(ConvertError::TimedOut {
                program: program.to_string(),
                timeout,
            })
        }
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConvertError::NotFound(program.to_string()))
        }
        Ok(Err(e)) => {
            return Err(ConvertError::Io {
                program: program.to_string(),
                source: e,
            })
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        return Err(ConvertError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
