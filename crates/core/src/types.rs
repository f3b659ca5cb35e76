/// Record identities are opaque strings generated by the caller.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar days (`YYYY-MM-DD`) are UTC calendar days.
pub type Date = chrono::NaiveDate;

/// Generate a fresh record identity (UUID v4, hyphenated).
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}
