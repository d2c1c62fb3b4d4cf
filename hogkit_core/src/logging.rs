//! Timestamped message fan-out to stdout and log files.
//!
//! This is the user-facing "print and log" helper. Diagnostic output of the
//! library itself goes through the `log` facade instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::config::{LogConfig, StampForm};
use crate::error::{Error, Result};

/// Renders `at` in the requested layout.
pub fn format_stamp(form: StampForm, at: &DateTime<Local>) -> String {
    match form {
        StampForm::Long => at.format("%Y-%m-%d %H:%M:%S :").to_string(),
        StampForm::Short => at.format("%m%d-%H%M").to_string(),
    }
}

/// Current local time in the requested layout.
pub fn time_stamp(form: StampForm) -> String {
    format_stamp(form, &Local::now())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::from_io(e, path))?;
    writeln!(file, "{}", line).map_err(|e| Error::from_io(e, path))
}

/// Prints `message` to stdout and appends it to every configured file.
///
/// The timestamp (if any) is prefixed first. Syslog files receive the line with
/// interior newlines replaced by `\r` so one message stays one record. Returns
/// the emitted line.
pub fn print_and_log(message: &str, config: &LogConfig) -> Result<String> {
    let line = match config.stamp {
        Some(form) => format!("{} {}", time_stamp(form), message),
        None => message.to_string(),
    };

    if !config.quiet {
        println!("{}", line);
    }
    for path in &config.log_files {
        append_line(path, &line)?;
    }
    if !config.syslog_files.is_empty() {
        let record = line.replace('\n', "\r");
        for path in &config.syslog_files {
            append_line(path, &record)?;
        }
    }
    log::trace!("logged to {} file(s)", config.log_files.len() + config.syslog_files.len());
    Ok(line)
}
