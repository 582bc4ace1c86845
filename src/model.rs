//! Record entity and request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cache key of the live-record counter.
pub const RECORDS_KEY: &str = "records";

/// Persisted record. `created_at` and `updated_at` are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: Uuid,
    pub data: String,
    pub order_date: DateTime<Utc>,
    pub forward: bool,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create and update requests. Unknown fields are rejected; missing fields take zero values.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordInput {
    pub data: String,
    pub order_date: DateTime<Utc>,
    pub forward: bool,
    pub location: String,
}

impl Record {
    /// Record as built from an update request; timestamps stay zero until the store stamps `updated_at`.
    pub fn from_input(id: Uuid, input: RecordInput) -> Self {
        Self {
            id,
            data: input.data,
            order_date: input.order_date,
            forward: input.forward,
            location: input.location,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_rejects_unknown_fields() {
        let err = serde_json::from_str::<RecordInput>(r#"{"data":"x","colour":"red"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn input_missing_fields_are_zeroed() {
        let input: RecordInput = serde_json::from_str(r#"{"data":"only data"}"#).unwrap();
        assert_eq!(input.data, "only data");
        assert!(!input.forward);
        assert_eq!(input.location, "");
        assert_eq!(input.order_date, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn input_parses_rfc3339_order_date() {
        let input: RecordInput = serde_json::from_str(
            r#"{"data":"ABC","order_date":"2005-04-01T15:04:05Z","forward":true,"location":"Port 1"}"#,
        )
        .unwrap();
        assert_eq!(input.order_date.to_rfc3339(), "2005-04-01T15:04:05+00:00");
        assert!(input.forward);
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let record = Record::from_input(Uuid::nil(), RecordInput::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in ["id", "data", "order_date", "forward", "location", "created_at", "updated_at"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
