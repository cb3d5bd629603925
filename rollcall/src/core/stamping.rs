//! Timestamp assignment applied at persist time.

use crate::core::types::CheckInRecord;

/// Stamp every record that has no timestamp yet; returns how many were stamped.
///
/// Records that already carry a timestamp are left untouched.
pub fn stamp_pending(records: &mut [CheckInRecord], timestamp: &str) -> usize {
    let mut stamped = 0;
    for record in records.iter_mut().filter(|record| !record.is_stamped()) {
        record.timestamp = Some(timestamp.to_string());
        stamped += 1;
    }
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unstamped_records_change() {
        let mut records = vec![
            CheckInRecord {
                identifier: 1,
                checked: true,
                timestamp: Some("2024-05-01 08:00:00".to_string()),
            },
            CheckInRecord::pending(2),
        ];
        assert_eq!(stamp_pending(&mut records, "2024-05-01 09:30:00"), 1);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-05-01 08:00:00"));
        assert_eq!(records[1].timestamp.as_deref(), Some("2024-05-01 09:30:00"));

        assert_eq!(stamp_pending(&mut records, "2024-05-02 10:00:00"), 0);
        assert_eq!(records[1].timestamp.as_deref(), Some("2024-05-01 09:30:00"));
    }
}
