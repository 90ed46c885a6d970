use serde::{Deserialize, Serialize};

/// one sensor payload, exactly as the device sent it
///
/// no schema is enforced. the dashboard looks for these keys but none are required:
/// - {"sensor": "temp", "value1": 21.5, "value2": 40.0}
/// - {"sensor": "dht22", "value1": 22.1}
pub type Reading = serde_json::Map<String, serde_json::Value>;

/// key the server writes into every stored reading
pub const CLIENT_IP_KEY: &str = "client_ip";

/// wall-clock format used for `last_update` and history timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// a reading kept in the recent history
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct HistoryEntry {
    /// server-local ingestion time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,

    /// the annotated reading (device keys + `client_ip`)
    pub data: Reading,
}

/// read-only copy of the store, served as-is by GET /api/data
#[derive(Clone, Default, Serialize, Deserialize, Debug, PartialEq)]
pub struct StoreView {
    /// timestamp of the most recent ingestion, null until the first one
    pub last_update: Option<String>,
    /// most recent annotated reading, null until the first one
    pub sensor_data: Option<Reading>,
    /// recent entries, oldest first
    pub history: Vec<HistoryEntry>,
}

/// body returned by POST /api/data
#[derive(Clone, Serialize, Debug)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusResponse {
    pub const RECEIVED: Self = Self { status: "success", message: "Data received" };
    pub const INVALID: Self = Self { status: "error", message: "Invalid data" };
}

/// copy a reading and stamp the origin address over any client-sent value
pub fn annotate(mut reading: Reading, client_ip: &str) -> Reading {
    reading.insert(CLIENT_IP_KEY.to_string(), serde_json::Value::String(client_ip.to_string()));
    reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(v: serde_json::Value) -> Reading {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_annotate_appends_client_ip_last() {
        let r = annotate(reading(json!({"sensor": "temp", "value1": 21.5})), "10.0.0.5");
        let keys: Vec<&str> = r.keys().map(String::as_str).collect();
        assert_eq!(keys, ["sensor", "value1", "client_ip"]);
        assert_eq!(r["client_ip"], "10.0.0.5");
    }

    #[test]
    fn test_annotate_overwrites_spoofed_ip() {
        let r = annotate(reading(json!({"client_ip": 42, "value1": 1})), "1.2.3.4");
        assert_eq!(r["client_ip"], "1.2.3.4");
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_empty_view_serializes_nulls() {
        let v = serde_json::to_value(StoreView::default()).unwrap();
        assert_eq!(v, json!({"last_update": null, "sensor_data": null, "history": []}));
    }
}
