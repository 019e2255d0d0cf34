// Terminal notifier

use chrono::Local;
use colored::Colorize;
use std::io::{self, Write};

use crate::core::monitor::Notifier;
use crate::error::Result;

/// Prints alerts to stdout and errors to stderr, each stamped with the local time.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "{} {}",
            timestamp().dimmed(),
            title.yellow().bold()
        )?;
        for line in message.lines() {
            writeln!(out, "  {}", line)?;
        }
        out.flush()?;
        Ok(())
    }

    fn show_error(&self, message: &str) -> Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "{} {}", timestamp().dimmed(), message.red())?;
        Ok(())
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
