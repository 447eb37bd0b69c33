//! Response documents for the endpoints the check reads.
//!
//! Only the fields the check needs are declared; everything else in the
//! documents is ignored.

use serde::Deserialize;

pub const SYSTEM_PATH: &str = "/system";
pub const INDEXER_FAILURES_PATH: &str = "/system/indexer/failures";
pub const THROUGHPUT_PATH: &str = "/system/throughput";
pub const INPUTS_PATH: &str = "/system/inputs";
pub const TOTAL_COUNT_PATH: &str = "/count/total";

/// `GET /system`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemStatus {
    pub is_processing: bool,
    pub lifecycle: String,
    pub lb_status: String,
}

/// `GET /system/indexer/failures`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexerFailuresResponse {
    pub total: u64,
}

/// `GET /system/throughput`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThroughputResponse {
    pub throughput: f64,
}

/// `GET /system/inputs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputsResponse {
    pub total: u64,
}

/// `GET /count/total`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TotalCountResponse {
    pub events: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_ignores_extra_fields() {
        let body = r#"{
            "facility": "graylog-server",
            "codename": "Noir",
            "node_id": "5c8f0e3a",
            "is_processing": true,
            "lifecycle": "running",
            "lb_status": "alive",
            "timezone": "UTC"
        }"#;
        let status: SystemStatus = serde_json::from_str(body).unwrap();
        assert!(status.is_processing);
        assert_eq!(status.lifecycle, "running");
        assert_eq!(status.lb_status, "alive");
    }

    #[test]
    fn test_system_wrong_types() {
        assert!(serde_json::from_str::<SystemStatus>(
            r#"{"is_processing": "yes", "lifecycle": "running", "lb_status": "alive"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<SystemStatus>(r#"{"is_processing": true}"#).is_err());
    }

    #[test]
    fn test_inputs_with_list() {
        let body = r#"{"inputs": [{"id": "a"}, {"id": "b"}], "total": 2}"#;
        let inputs: InputsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(inputs.total, 2);
    }

    #[test]
    fn test_throughput_accepts_integer() {
        let tp: ThroughputResponse = serde_json::from_str(r#"{"throughput": 12}"#).unwrap();
        assert_eq!(tp.throughput, 12.0);
    }

    #[test]
    fn test_counts_reject_negative() {
        assert!(serde_json::from_str::<TotalCountResponse>(r#"{"events": -1}"#).is_err());
        assert!(serde_json::from_str::<IndexerFailuresResponse>(r#"{"total": null}"#).is_err());
    }
}
