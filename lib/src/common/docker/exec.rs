//! # Dockhand Exec Resource (`common::docker::exec`)
//!
//! File: lib/src/common/docker/exec.rs
//!
//! ## Overview
//!
//! Runs a command inside a running container through the Engine's exec
//! endpoints and collects its output. This is the non-interactive flavor:
//! stdout and stderr are attached, drained into a buffer, and returned
//! together with the command's exit code. It backs the library's test
//! harness for copy operations (verifying uploaded file contents in-place)
//! and is exposed for callers with the same need.
//!
//! ## Architecture
//!
//! Three Engine calls in sequence:
//! 1. `create_exec` with stdout/stderr attachment and the command line,
//! 2. `start_exec`, draining the multiplexed output stream to completion,
//! 3. `inspect_exec` to read the exit code once the stream has ended.
//!
//! A 404 on creation is translated to `ContainerNotFound`; everything else
//! propagates as `DockerApi`.
//!
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use bollard::exec::{CreateExecOptions, StartExecResults};
use bollard::Docker;
use futures_util::StreamExt;
use tracing::{debug, info, instrument};

/// Output of a completed exec session.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Combined stdout/stderr, in arrival order.
    pub output: String,
    /// Exit code of the command, or -1 if the daemon did not report one.
    pub exit_code: i64,
}

/// Executes `cmd` inside a running container and collects its output.
///
/// # Arguments
///
/// * `name_or_id` - The target container; must be running.
/// * `cmd` - Command and arguments, e.g. `&["cat", "/tmp/file.txt"]`.
/// * `workdir` - Optional working directory inside the container.
///
/// # Errors
///
/// * `DockhandError::ContainerNotFound` - If the container does not exist.
/// * `DockhandError::DockerApi` - For other daemon failures.
#[instrument(skip(docker, cmd), fields(container = %name_or_id))]
pub async fn run_in_container(
    docker: &Docker,
    name_or_id: &str,
    cmd: &[&str],
    workdir: Option<&str>,
) -> Result<ExecOutput> {
    let options = CreateExecOptions {
        attach_stdout: Some(true),
        attach_stderr: Some(true),
        cmd: Some(cmd.iter().map(|s| s.to_string()).collect()),
        working_dir: workdir.map(String::from),
        ..Default::default()
    };

    let created = docker
        .create_exec(name_or_id, options)
        .await
        .map_err(|e| match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            } => anyhow!(DockhandError::ContainerNotFound {
                name: name_or_id.to_string(),
            }),
            other => anyhow!(DockhandError::DockerApi { source: other }).context(format!(
                "Failed to create exec instance in container '{name_or_id}'"
            )),
        })?;

    debug!("Created exec instance {}", created.id);

    let mut output = String::new();
    match docker
        .start_exec(&created.id, None)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to start exec instance")?
    {
        StartExecResults::Attached {
            output: mut stream, ..
        } => {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk
                    .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
                    .context("Exec output stream failed")?;
                output.push_str(&chunk.to_string());
            }
        }
        StartExecResults::Detached => {
            debug!("Exec instance {} ran detached; no output", created.id);
        }
    }

    let inspect = docker
        .inspect_exec(&created.id)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to inspect exec instance")?;
    let exit_code = inspect.exit_code.unwrap_or(-1);

    info!(
        "Exec in '{}' finished with exit code {}",
        name_or_id, exit_code
    );
    Ok(ExecOutput { output, exit_code })
}
