//! Text helpers for failure notifications.

use chrono::Duration;

/// Group the digits of `value` in threes, e.g. `1234567` -> `1,234,567`
pub fn number_format(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Human readable length of a time span, using the largest whole unit
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);

    const UNITS: [(i64, &str); 5] = [
        (60 * 60 * 24 * 365, "year"),
        (60 * 60 * 24 * 30, "month"),
        (60 * 60 * 24, "day"),
        (60 * 60, "hour"),
        (60, "minute"),
    ];

    for (size, unit) in UNITS {
        if seconds >= size {
            return plural(seconds / size, unit);
        }
    }

    plural(seconds, "second")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{} {unit}s", number_format(count))
    }
}
