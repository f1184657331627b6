//! Notification system for the GUI
//!
//! Notifications record fetch failures and settings changes; the newest
//! entries are shown in the top-bar popup with a relative timestamp.

/// A notification entry with message and timestamp
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: chrono::Local::now(),
        }
    }

    pub fn time_ago(&self) -> String {
        let now = chrono::Local::now();
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_entry_stores_message() {
        let entry = NotificationEntry::new("Endpoint switched");
        assert_eq!(entry.message, "Endpoint switched");
    }

    #[test]
    fn test_time_ago_just_now() {
        let entry = NotificationEntry::new("fresh");
        assert_eq!(entry.time_ago(), "just now");
    }

    #[test]
    fn test_time_ago_minutes() {
        let mut entry = NotificationEntry::new("older");
        entry.timestamp = chrono::Local::now() - chrono::Duration::minutes(5);
        assert_eq!(entry.time_ago(), "5m ago");
    }

    #[test]
    fn test_time_ago_hours() {
        let mut entry = NotificationEntry::new("much older");
        entry.timestamp = chrono::Local::now() - chrono::Duration::hours(3);
        assert_eq!(entry.time_ago(), "3h ago");
    }
}
