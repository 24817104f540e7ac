//! Interactive duration resolver
//!
//! Resolves the recording duration from an explicit flag or an interactive
//! prompt with an advisory countdown. The countdown only prints a notice
//! when it elapses; the pending stdin read stays authoritative until it
//! returns or a termination signal interrupts the wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use colored::Colorize;
use tokio::sync::oneshot;

use crate::domain::recording::{Duration, DEFAULT_DURATION_MINUTES};

use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Seconds before the "no input received" notice is printed
pub const PROMPT_TIMEOUT_SECS: u64 = 10;

/// A line of input delivered off the blocking read thread
type InputLine = oneshot::Receiver<std::io::Result<String>>;

/// Resolve the recording duration from the explicit flag, falling back to
/// the interactive prompt when no flag was given.
pub async fn resolve_duration(
    explicit_minutes: Option<i64>,
    presenter: &Presenter,
    shutdown: &ShutdownSignal,
) -> Duration {
    match explicit_minutes {
        Some(minutes) if minutes > 0 => Duration::from_minutes(minutes as u64),
        Some(_) => {
            presenter.warn(&format!(
                "Duration must be a positive integer. Using default duration of {} minutes.",
                DEFAULT_DURATION_MINUTES
            ));
            Duration::default_duration()
        }
        None => {
            presenter.prompt(&format!(
                "Enter recording duration in minutes, press Enter for default ({}):",
                DEFAULT_DURATION_MINUTES
            ));
            prompt_for_duration(
                presenter,
                shutdown,
                read_stdin_line(),
                StdDuration::from_secs(PROMPT_TIMEOUT_SECS),
                || {
                    eprintln!(
                        "\n{} No input received, using default value of {} minutes",
                        "ℹ".cyan(),
                        DEFAULT_DURATION_MINUTES
                    );
                },
            )
            .await
        }
    }
}

/// Blocking stdin read on a detached thread, bridged with a oneshot so an
/// abandoned read never holds up runtime shutdown.
fn read_stdin_line() -> InputLine {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let result = std::io::stdin().read_line(&mut line).map(|_| line);
        let _ = tx.send(result);
    });
    rx
}

/// Wait for one line of input with the advisory countdown. `on_no_input`
/// runs when the countdown elapses before input arrives; it is advisory
/// only and the still-pending read remains authoritative.
async fn prompt_for_duration(
    presenter: &Presenter,
    shutdown: &ShutdownSignal,
    input: InputLine,
    timeout: StdDuration,
    on_no_input: impl FnOnce() + Send + 'static,
) -> Duration {
    // Write-once by the read path, read by the timer: once input has been
    // received the timer prints nothing even if it fires mid-cancellation.
    let input_received = Arc::new(AtomicBool::new(false));

    let timer_flag = Arc::clone(&input_received);
    let advisory_timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        if !timer_flag.load(Ordering::SeqCst) {
            on_no_input();
        }
    });

    tokio::select! {
        read = input => {
            input_received.store(true, Ordering::SeqCst);
            advisory_timer.abort();
            match read {
                Ok(Ok(line)) => parse_prompt_input(&line, presenter),
                _ => {
                    presenter.warn(&format!(
                        "Could not read input, using default value of {} minutes",
                        DEFAULT_DURATION_MINUTES
                    ));
                    Duration::default_duration()
                }
            }
        }
        _ = shutdown.notified() => {
            input_received.store(true, Ordering::SeqCst);
            advisory_timer.abort();
            presenter.warn(&format!(
                "Input interrupted, using default value of {} minutes",
                DEFAULT_DURATION_MINUTES
            ));
            Duration::default_duration()
        }
    }
}

/// Parse one line of prompt input. Empty input silently takes the default;
/// anything unparseable or non-positive warns and takes the default.
fn parse_prompt_input(line: &str, presenter: &Presenter) -> Duration {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Duration::default_duration();
    }
    match trimmed.parse::<Duration>() {
        Ok(duration) => duration,
        Err(e) => {
            presenter.warn(&format!(
                "Invalid input: {}. Using default duration of {} minutes.",
                e, DEFAULT_DURATION_MINUTES
            ));
            Duration::default_duration()
        }
    }
}
