use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

use super::SubmissionError;

/// Run the scheduler's submission command, feeding `script` on its stdin,
/// and collect its output.
pub fn run_scheduler(scheduler: &str, args: &[String], script: &str) -> Result<Output, SubmissionError> {
    log::debug!("running {scheduler} {}", args.join(" "));
    let mut child = Command::new(scheduler)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| SubmissionError::Spawn {
            scheduler: scheduler.to_owned(),
            source,
        })?;

    let mut stdin = child.stdin.take().ok_or_else(|| {
        SubmissionError::Stdin(std::io::Error::new(
            ErrorKind::BrokenPipe,
            "cannot attach to scheduler stdin",
        ))
    })?;

    // write on a separate thread so a chatty scheduler can't fill its
    // stdout pipe while we're still blocked writing the script:
    let script = script.to_owned();
    let writer = thread::spawn(move || stdin.write_all(script.as_bytes()));

    let output = child
        .wait_with_output()
        .map_err(|source| SubmissionError::Spawn {
            scheduler: scheduler.to_owned(),
            source,
        })?;

    match writer.join() {
        Ok(Ok(())) => {}
        // the exit status says whether the scheduler was happy:
        Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
            log::warn!("{scheduler} exited before reading the whole job script")
        }
        Ok(Err(e)) => return Err(SubmissionError::Stdin(e)),
        Err(_) => {
            return Err(SubmissionError::Stdin(std::io::Error::new(
                ErrorKind::Other,
                "job script writer thread panicked",
            )))
        }
    }

    Ok(output)
}

/// Extract the job id from LSF's `Job <1234> is submitted to queue <lotus>.`
pub fn parse_job_id(stdout: &str) -> Option<&str> {
    let (_, rest) = stdout.split_once("Job <")?;
    let (id, _) = rest.split_once('>')?;
    Some(id.trim()).filter(|id| !id.is_empty())
}
