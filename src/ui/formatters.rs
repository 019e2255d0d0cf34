use colored::Colorize;
use humansize::{format_size, BINARY};
use std::fmt::Write;

use crate::core::config::Config;
use crate::core::monitor::TickReport;

/// Format a millisecond interval as `5s`, `5m` or `1h 30m`
pub fn format_interval(ms: u64) -> String {
    if ms < 1_000 {
        return format!("{}ms", ms);
    }
    let secs = ms / 1_000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3_600 {
        match secs % 60 {
            0 => format!("{}m", secs / 60),
            rest => format!("{}m {}s", secs / 60, rest),
        }
    } else {
        match (secs % 3_600) / 60 {
            0 => format!("{}h", secs / 3_600),
            minutes => format!("{}h {}m", secs / 3_600, minutes),
        }
    }
}

/// Human-readable view of the resolved configuration and where it came from
pub fn format_config_summary(config: &Config, sources: &[&str]) -> String {
    let drives = config
        .drives()
        .iter()
        .map(|d| format!("{}:", d))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Effective configuration".bold());
    let _ = writeln!(out, "  Drives:           {}", drives);
    let _ = writeln!(
        out,
        "  Warn below:       {}% free and {} free",
        config.warn_percent(),
        format_size(config.warn_below_bytes(), BINARY)
    );
    let _ = writeln!(
        out,
        "  First check:      after {}",
        format_interval(config.initial_interval_ms())
    );
    let _ = writeln!(
        out,
        "  Check interval:   every {}",
        format_interval(config.check_interval_ms())
    );
    let _ = writeln!(
        out,
        "  Obsess:           {}",
        if config.obsess() { "yes" } else { "no" }
    );
    if let Some(message) = config.warn_message() {
        let _ = writeln!(out, "  Extra message:    {}", message);
    }

    let _ = writeln!(out, "{}", "Sources (lowest precedence first)".bold());
    for source in sources {
        let _ = writeln!(out, "  {}", source.dimmed());
    }
    out
}

/// One-line outcome of a single check, `None` when alerts went out
pub fn format_check_outcome(report: &TickReport, drive_list: &str) -> Option<String> {
    if !report.alerts.is_empty() {
        return None;
    }
    let line = if report.enumeration_failed {
        "Could not list volumes, nothing was checked.".yellow()
    } else if report.checked == 0 {
        format!("None of the drives {} is mounted, nothing was checked.", drive_list).yellow()
    } else {
        format!(
            "{} of the drives {} checked, all have enough free space.",
            report.checked, drive_list
        )
        .green()
    };
    Some(line.to_string())
}
