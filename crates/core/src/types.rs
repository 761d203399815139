/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day (UTC). Suggestion assignment is keyed by this.
pub type DayStamp = chrono::NaiveDate;
