//! Serialization workload
//!
//! Wraps the caller's payload in a document with 10 000 generated records,
//! encodes it to JSON, decodes it again and checks that every record survived.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{Result, WorkloadError};
use crate::measure::{measure, ms_string};

/// Number of generated records added to every document
pub const GENERATED_RECORDS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GeneratedRecord {
    id: u64,
    /// Uniform in `[0, 1000)`
    value: f64,
    /// Generation instant in epoch milliseconds, offset by `id`
    timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessingDocument<'a> {
    original_data: &'a Value,
    processed_at: DateTime<Utc>,
    large_array: Vec<GeneratedRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecodedDocument {
    large_array: Vec<GeneratedRecord>,
}

/// Result of one serialization round trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SerializationReport {
    /// Bytes of the caller's payload encoded on its own
    pub original_body_size: usize,
    /// Bytes of the whole encoded document
    pub processed_data_size: usize,
    #[serde(with = "ms_string")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "9ms"))]
    pub execution_time: Duration,
    /// Records present after decoding
    pub items_processed: usize,
    pub timestamp: DateTime<Utc>,
}

fn generate_records(count: usize) -> Vec<GeneratedRecord> {
    let mut rng = rand::thread_rng();
    let base = Utc::now().timestamp_millis();

    (0..count as u64)
        .map(|id| GeneratedRecord {
            id,
            value: rng.gen::<f64>() * 1000.0,
            timestamp: base + id as i64,
        })
        .collect()
}

fn round_trip(payload: &Value) -> Result<(usize, usize)> {
    let document = ProcessingDocument {
        original_data: payload,
        processed_at: Utc::now(),
        large_array: generate_records(GENERATED_RECORDS),
    };

    let encoded = serde_json::to_string(&document)?;
    let decoded: DecodedDocument = serde_json::from_str(&encoded)?;

    let items = decoded.large_array.len();
    if items != GENERATED_RECORDS {
        return Err(WorkloadError::RoundTripMismatch {
            expected: GENERATED_RECORDS,
            actual: items,
        });
    }

    Ok((encoded.len(), items))
}

/// Run the round trip for `payload`
pub fn run_serialization(payload: &Value) -> Result<SerializationReport> {
    let timed = measure(|| round_trip(payload)).transpose()?;
    let (processed_data_size, items_processed) = timed.value;
    let original_body_size = serde_json::to_string(payload)?.len();

    tracing::debug!(
        original_body_size,
        processed_data_size,
        items_processed,
        elapsed_ms = crate::measure::duration_to_ms(timed.elapsed),
        "serialization workload finished"
    );

    Ok(SerializationReport {
        original_body_size,
        processed_data_size,
        execution_time: timed.elapsed,
        items_processed,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_records_shape() {
        let records = generate_records(100);
        assert_eq!(records.len(), 100);

        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.id, index as u64);
            assert!((0.0..1000.0).contains(&record.value));
            assert_eq!(record.timestamp - records[0].timestamp, index as i64);
        }
    }

    #[test]
    fn test_round_trip_preserves_items() {
        let report = run_serialization(&json!({"name": "test", "values": [1, 2, 3]})).unwrap();
        assert_eq!(report.items_processed, GENERATED_RECORDS);
        assert_eq!(report.original_body_size, r#"{"name":"test","values":[1,2,3]}"#.len());
        assert!(report.processed_data_size >= report.original_body_size);
    }

    #[test]
    fn test_any_payload_shape() {
        for payload in [
            Value::Null,
            json!("plain text"),
            json!(12.5),
            json!([true, false]),
            json!({"nested": {"deeper": {"list": [{"a": 1}]}}}),
        ] {
            let report = run_serialization(&payload).unwrap();
            assert_eq!(report.items_processed, GENERATED_RECORDS);
            assert!(report.processed_data_size >= report.original_body_size);
        }
    }

    #[test]
    fn test_large_payload_is_embedded() {
        let payload = json!({"blob": "y".repeat(50_000)});
        let report = run_serialization(&payload).unwrap();
        assert!(report.original_body_size > 50_000);
        assert!(report.processed_data_size > report.original_body_size);
    }

    #[test]
    fn test_report_wire_names() {
        let json = serde_json::to_value(run_serialization(&json!({})).unwrap()).unwrap();
        assert_eq!(json["originalBodySize"], 2);
        assert_eq!(json["itemsProcessed"], 10_000);
        assert!(json["processedDataSize"].as_u64().unwrap() > 2);
        assert!(json["executionTime"].as_str().unwrap().ends_with("ms"));
    }
}
