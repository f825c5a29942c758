//! Backup filename timestamp parsing and latest-backup selection.
//!
//! Backup files follow the device-defined naming contract
//! `sms-YYYYMMDDHHMMSS.xml`. The embedded timestamp is the authoritative
//! capture time and is the sole selection key; names that do not match the
//! contract are excluded from selection entirely.

use chrono::NaiveDateTime;

/// Expected filename prefix.
const BACKUP_PREFIX: &str = "sms-";
/// Expected filename extension.
const BACKUP_EXTENSION: &str = ".xml";
/// Timestamp format embedded between prefix and extension.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Extract the capture timestamp from a backup filename.
///
/// Returns `None` unless the name matches `sms-<14 digits>.xml` exactly and
/// the digits decode as a real calendar datetime.
pub fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    let digits = name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?;

    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDateTime::parse_from_str(digits, TIMESTAMP_FORMAT).ok()
}

/// Select the item with the latest filename-embedded timestamp.
///
/// Items whose name fails [`parse_backup_timestamp`] are skipped. Ties are
/// broken deterministically in favor of the first item seen, so results are
/// reproducible for a fixed listing order. Returns `None` when no item
/// carries a valid backup name.
pub fn select_latest_backup<'a, T, F>(items: &'a [T], name_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let mut latest: Option<(NaiveDateTime, &T)> = None;

    for item in items {
        let Some(timestamp) = parse_backup_timestamp(name_of(item)) else {
            continue;
        };
        match latest {
            Some((current, _)) if timestamp <= current => {}
            _ => latest = Some((timestamp, item)),
        }
    }

    latest.map(|(_, item)| item)
}
