use chrono::{DateTime, Datelike, Utc};

/// Age label for a last-opened timestamp (ms since epoch)
///
/// Within a week the label is relative ("3h ago", "5d ago"); older timestamps show
/// the date, with the year only when it differs from `now`'s.
pub fn format_age(timestamp_millis: i64, now: &DateTime<Utc>) -> String {
    let Some(opened) = DateTime::from_timestamp_millis(timestamp_millis) else {
        return "unknown".to_string();
    };
    let elapsed = now.signed_duration_since(opened);

    match (elapsed.num_days(), elapsed.num_hours(), elapsed.num_minutes()) {
        (days, _, _) if days >= 7 => {
            let pattern = if opened.year() == now.year() { "%b %-d" } else { "%b %-d, %Y" };
            opened.format(pattern).to_string()
        }
        (days, _, _) if days > 0 => format!("{}d ago", days),
        (_, hours, _) if hours > 0 => format!("{}h ago", hours),
        (_, _, minutes) if minutes > 0 => format!("{}m ago", minutes),
        // Clock skew can put a timestamp slightly ahead of now
        _ => "just now".to_string(),
    }
}
