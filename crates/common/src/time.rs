use chrono::Duration;

/// Parses the informal `"72h"`, `"30m"`, `"10s"` duration strings used
/// in `condition { value = "..." }` blocks. Accepts a plain integer
/// count of the unit suffix; unknown suffixes are rejected by the
/// caller (the policy validator), not here.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (digits, suffix) = raw.split_at(raw.len().checked_sub(1)?);
    let n: i64 = digits.parse().ok()?;
    match suffix {
        "s" => Some(Duration::seconds(n)),
        "m" => Some(Duration::minutes(n)),
        "h" => Some(Duration::hours(n)),
        "d" => Some(Duration::days(n)),
        _ => None,
    }
}
