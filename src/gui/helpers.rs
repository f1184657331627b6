//! Helper functions for the GUI
//!
//! Contains utility functions for id abbreviation, status display, and
//! timestamp/fee formatting.

use chrono::{DateTime, Utc};
use eframe::egui::Color32;

use crate::types::TransactionStatus;

/// Shown in timestamp cells when the daemon recorded no timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Shorten a transaction/substate id to "abcdef...1234" for table cells.
/// Ids shorter than the abbreviated form are returned unchanged.
pub fn abbreviate_id(id: &str) -> String {
    if id.len() > 14 {
        format!("{}...{}", &id[..8], &id[id.len() - 4..])
    } else {
        id.to_string()
    }
}

/// Status indicator color used by chips and table rows.
pub fn status_color(status: TransactionStatus) -> Color32 {
    match status {
        TransactionStatus::New | TransactionStatus::DryRun => Color32::GRAY,
        TransactionStatus::Pending => Color32::from_rgb(255, 170, 0),
        TransactionStatus::Accepted => Color32::from_rgb(92, 200, 130),
        TransactionStatus::OnlyFeeAccepted => Color32::from_rgb(200, 170, 60),
        TransactionStatus::Rejected | TransactionStatus::InvalidTransaction => {
            Color32::from_rgb(235, 87, 87)
        }
    }
}

/// Render a timestamp cell value, falling back when the daemon omitted it.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
}

/// Format a fee total with thousands separators.
pub fn format_fees(fees: u64) -> String {
    let digits = fees.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Check whether an input string is a plausible transaction id: 64 hex
/// characters (a 32-byte hash), with surrounding whitespace ignored.
pub fn is_valid_transaction_id(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.len() == 64 && hex::decode(trimmed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ==================== abbreviate_id tests ====================

    #[test]
    fn test_abbreviate_id_long() {
        let id = "aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899";
        assert_eq!(abbreviate_id(id), "aabbccdd...8899");
    }

    #[test]
    fn test_abbreviate_id_short_unchanged() {
        assert_eq!(abbreviate_id("abc123"), "abc123");
        assert_eq!(abbreviate_id(""), "");
    }

    #[test]
    fn test_abbreviate_id_boundary_unchanged() {
        // 14 chars is the longest id returned unchanged
        assert_eq!(abbreviate_id("12345678901234"), "12345678901234");
    }

    // ==================== status_color tests ====================

    #[test]
    fn test_status_color_failure_states_match() {
        assert_eq!(
            status_color(TransactionStatus::Rejected),
            status_color(TransactionStatus::InvalidTransaction)
        );
    }

    #[test]
    fn test_status_color_accepted_differs_from_rejected() {
        assert_ne!(
            status_color(TransactionStatus::Accepted),
            status_color(TransactionStatus::Rejected)
        );
    }

    // ==================== format_timestamp tests ====================

    #[test]
    fn test_format_timestamp_present() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(Some(t)), "2024-03-15 12:30:00 UTC");
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), UNKNOWN_TIMESTAMP);
    }

    // ==================== format_fees tests ====================

    #[test]
    fn test_format_fees_zero() {
        assert_eq!(format_fees(0), "0");
    }

    #[test]
    fn test_format_fees_small() {
        assert_eq!(format_fees(999), "999");
    }

    #[test]
    fn test_format_fees_thousands() {
        assert_eq!(format_fees(1000), "1,000");
        assert_eq!(format_fees(4250), "4,250");
    }

    #[test]
    fn test_format_fees_millions() {
        assert_eq!(format_fees(1_234_567), "1,234,567");
    }

    // ==================== is_valid_transaction_id tests ====================

    #[test]
    fn test_is_valid_transaction_id_ok() {
        let id = "aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899";
        assert!(is_valid_transaction_id(id));
    }

    #[test]
    fn test_is_valid_transaction_id_trims_whitespace() {
        let id = "  aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899  ";
        assert!(is_valid_transaction_id(id));
    }

    #[test]
    fn test_is_valid_transaction_id_wrong_length() {
        assert!(!is_valid_transaction_id("aabbcc"));
        assert!(!is_valid_transaction_id(""));
    }

    #[test]
    fn test_is_valid_transaction_id_non_hex() {
        let id = "zzbbccddeeff00112233445566778899aabbccddeeff00112233445566778899";
        assert!(!is_valid_transaction_id(id));
    }
}
