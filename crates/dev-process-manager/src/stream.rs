//! Child stdout/stderr capture.
//!
//! Each stream gets its own reader task. Lines from one stream are forwarded
//! in arrival order; lines from different streams interleave as they come.

use crate::line::LogLine;
use crate::sink::LogSink;
use project_layout::ServiceRole;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Reader task for one child stream. Resolves to the number of lines forwarded.
pub type StreamTask = JoinHandle<usize>;

/// Attach line readers to a child's piped stdout and stderr.
///
/// Both streams share the role's formatter. Streams that were not piped are
/// skipped with a debug event.
pub fn attach_output_streams(
    child: &mut Child,
    role: ServiceRole,
    sink: Arc<dyn LogSink>,
) -> Vec<StreamTask> {
    let mut tasks = Vec::new();

    match child.stdout.take() {
        Some(stdout) => tasks.push(tokio::spawn(pump_lines(
            stdout,
            role,
            "stdout",
            sink.clone(),
        ))),
        None => debug!(
            role = %role,
            stream = "stdout",
            "Child stdout unavailable for capture"
        ),
    }

    match child.stderr.take() {
        Some(stderr) => tasks.push(tokio::spawn(pump_lines(stderr, role, "stderr", sink))),
        None => debug!(
            role = %role,
            stream = "stderr",
            "Child stderr unavailable for capture"
        ),
    }

    tasks
}

/// Read `reader` to EOF, writing every non-blank line to `sink`.
///
/// Returns the number of lines forwarded. A read error ends the stream.
pub async fn pump_lines<R>(
    reader: R,
    role: ServiceRole,
    stream_name: &'static str,
    sink: Arc<dyn LogSink>,
) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut forwarded = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if let Some(line) = LogLine::from_raw(role, &buf) {
                    sink.line(&line.render());
                    forwarded += 1;
                }
            }
            Err(err) => {
                warn!(
                    event_code = "launcher.child.stream_read_failed",
                    role = %role,
                    stream = stream_name,
                    error = %err,
                    "Child output stream read failed"
                );
                break;
            }
        }
    }

    debug!(
        event_code = "launcher.child.stream_ended",
        role = %role,
        stream = stream_name,
        lines = forwarded,
        "Child output stream ended"
    );

    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;

    #[tokio::test]
    async fn test_pump_forwards_non_blank_lines_in_order() {
        let sink = BufferSink::new();
        let input: &[u8] = b"first\n\n  \nsecond\r\nthird";

        let count = pump_lines(
            input,
            ServiceRole::Frontend,
            "stdout",
            Arc::new(sink.clone()),
        )
        .await;

        assert_eq!(count, 3);
        assert_eq!(
            sink.stdout_lines(),
            vec![
                "\x1b[36m[Frontend] first\x1b[0m",
                "\x1b[36m[Frontend] second\x1b[0m",
                "\x1b[36m[Frontend] third\x1b[0m",
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_empty_stream() {
        let sink = BufferSink::new();
        let input: &[u8] = b"";
        let count = pump_lines(input, ServiceRole::Backend, "stderr", Arc::new(sink.clone())).await;
        assert_eq!(count, 0);
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn test_pump_uses_backend_style() {
        let sink = BufferSink::new();
        let input: &[u8] = b"Traceback (most recent call last):\n";
        pump_lines(input, ServiceRole::Backend, "stderr", Arc::new(sink.clone())).await;
        assert_eq!(
            sink.stdout_lines(),
            vec!["\x1b[33m[Backend]  Traceback (most recent call last):\x1b[0m"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_attached_tasks_report_line_counts() {
        let sink = BufferSink::new();
        let mut child = tokio::process::Command::new("sh")
            .args(["-c", "printf 'a\\nb\\n'; echo err 1>&2"])
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .unwrap();

        let tasks =
            attach_output_streams(&mut child, ServiceRole::Backend, Arc::new(sink.clone()));
        assert_eq!(tasks.len(), 2);
        child.wait().await.unwrap();

        let mut counts = Vec::new();
        for task in tasks {
            counts.push(task.await.unwrap());
        }
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(sink.stdout_lines().len(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unpiped_child_gets_no_tasks() {
        let mut child = tokio::process::Command::new("true")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .unwrap();

        let tasks = attach_output_streams(
            &mut child,
            ServiceRole::Frontend,
            Arc::new(BufferSink::new()),
        );
        assert!(tasks.is_empty());
        let _ = child.wait().await;
    }
}
