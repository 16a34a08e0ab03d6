use colored::Colorize;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

/// Run an external program to completion, capturing its output.
///
/// Errors are plain strings ready to show the user: a missing binary, a
/// timeout, or a non-zero exit with its stderr.
pub async fn run_command(
    program: &str,
    args: &[String],
    timeout_secs: u64,
    verbose: bool,
) -> Result<String, String> {
    let start_time = Instant::now();

    if verbose {
        eprintln!(
            "{}",
            format!(
                "[tools] run: {} {} (timeout={}s)",
                program,
                args.join(" "),
                timeout_secs
            )
            .dimmed()
        );
    }

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            format!("'{}' was not found on PATH", program)
        } else {
            format!("Failed to spawn '{}': {}", program, e)
        }
    })?;

    let output = timeout(Duration::from_secs(timeout_secs), child.wait_with_output())
        .await
        .map_err(|_| format!("'{}' timed out after {} seconds", program, timeout_secs))?
        .map_err(|e| format!("Failed to wait for '{}': {}", program, e))?;

    if verbose {
        eprintln!(
            "{}",
            format!(
                "[tools] done: exit_code={}, duration={:.2}s",
                output.status.code().unwrap_or(-1),
                start_time.elapsed().as_secs_f64()
            )
            .dimmed()
        );
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "'{}' exited with code {}\nStderr: {}",
            program,
            output.status.code().unwrap_or(-1),
            stderr.trim_end()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
