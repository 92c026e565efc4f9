// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bootcard_tui::{InternalEvent, TransitionTimer};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Fires `TransitionElapsed` from a detached thread once the delay passes.
/// Navigation admits a single in-flight transition, so at most one sleeper
/// exists at a time.
#[derive(Debug, Default)]
pub struct ThreadTimer;

impl TransitionTimer for ThreadTimer {
    fn schedule(&mut self, token: u64, delay: Duration, tx: Sender<InternalEvent>) -> Result<()> {
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(InternalEvent::TransitionElapsed { token });
        });
        Ok(())
    }
}

/// Sends log lines to a file so they never draw over the alternate screen.
/// Without a configured file, logging stays off. `RUST_LOG` overrides the
/// configured level.
pub fn init_logging(file: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = file else {
        return Ok(());
    };

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_owned()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ThreadTimer, init_logging};
    use anyhow::Result;
    use bootcard_tui::{InternalEvent, TransitionTimer};
    use std::path::Path;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn thread_timer_delivers_the_token_after_the_delay() -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut timer = ThreadTimer;

        timer.schedule(7, Duration::from_millis(5), tx)?;

        let event = rx.recv_timeout(Duration::from_secs(2))?;
        assert_eq!(event, InternalEvent::TransitionElapsed { token: 7 });
        Ok(())
    }

    #[test]
    fn thread_timer_survives_a_dropped_receiver() -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut timer = ThreadTimer;
        drop(rx);

        timer.schedule(1, Duration::from_millis(1), tx)?;
        std::thread::sleep(Duration::from_millis(20));
        Ok(())
    }

    #[test]
    fn missing_log_file_disables_logging() -> Result<()> {
        init_logging(None, "info")
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let error = init_logging(Some(Path::new("/nonexistent-dir/bootcard.log")), "info")
            .expect_err("missing parent directory should fail");
        assert!(format!("{error:#}").contains("open log file"));
    }
}
