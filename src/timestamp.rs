//! Synthetic timestamp record formatting (spec §4.7, §6).

use chrono::Local;

/// Formats the current local wall-clock time into a synthetic record of the
/// form `timestamp:<RFC-2822-style date>\n`.
///
/// The date format matches `strftime("%a, %d %b %Y %T %z", localtime(now))`
/// from spec §6 exactly (`%T` is `%H:%M:%S`).
#[must_use]
pub fn format_record() -> Vec<u8> {
    let now = Local::now();
    format!("timestamp:{}\n", now.format("%a, %d %b %Y %H:%M:%S %z")).into_bytes()
}
