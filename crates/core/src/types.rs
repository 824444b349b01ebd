/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts. Stored as NUMERIC, serialized as a decimal string.
pub type Money = rust_decimal::Decimal;
