/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// VaultRE record identifiers (properties, suburbs, staff).
pub type CrmId = i64;
