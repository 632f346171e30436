/// Meal ids are PostgreSQL BIGSERIAL, assigned by the catalog on insert.
pub type DbId = i64;

/// `battles` / `wins` counters are INTEGER columns.
pub type StatCount = i32;

/// Row timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
