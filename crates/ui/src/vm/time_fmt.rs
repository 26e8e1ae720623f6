use chrono::{DateTime, Local, Utc};

/// Label for a session's save time, in the viewer's local time zone.
///
/// Records whose server timestamp has not resolved yet get a placeholder.
#[must_use]
pub fn format_saved_at(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "pending sync".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantra_core::time::fixed_now;

    #[test]
    fn unresolved_timestamp_gets_placeholder() {
        assert_eq!(format_saved_at(None), "pending sync");
    }

    #[test]
    fn resolved_timestamp_formats_to_minute_precision() {
        let label = format_saved_at(Some(fixed_now()));
        assert_eq!(label.len(), "2023-11-14 22:13".len());
        assert!(label.contains(' '));
    }
}
