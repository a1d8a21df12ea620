// [library] Serde - JSON serialization for API responses and node properties
use serde::{Deserialize, Serialize};

// [rust] Row values are kept as raw JSON so no stored property is dropped
use serde_json::{Map, Value};

// [business] Marker returned by POST /records, kept byte-for-byte for existing clients
pub const RECORD_CREATED_MESSAGE: &str = "✅ Record insertado";

// [business] Emissions record - one (country code, year, population, emissions) tuple
// Stored as a :Record node; these four fields are its complete property set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub iso_code: String, // [business] Country code, e.g. "CO"
    pub year: i64,        // [business] Reporting year
    pub population: i64,  // [business] Population for that year
    pub total_ghg: f64,   // [business] Total greenhouse gas emissions, two decimals
}

// [business] Node property map as read back from the graph
// Country nodes have no fixed shape, and Records are returned exactly as stored
pub type Properties = Map<String, Value>;

// [business] Body of every list endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub total: usize,
    pub data: Vec<Properties>,
}

impl ListResponse {
    pub fn new(data: Vec<Properties>) -> Self {
        Self {
            total: data.len(), // [business] total always equals data length
            data,
        }
    }
}

// [business] Body of POST /records on success
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub data: Properties,
}

// [business] Body of GET /health on success and failure
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub instance: String,
    pub database: String,
}

// [business] Body of GET /whoami
#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub instance: String,
}

// [business] Body of every 500 from a data route
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_counts_data() {
        let data = vec![
            json!({"iso_code": "CO"}).as_object().cloned().unwrap(),
            json!({"iso_code": "MX"}).as_object().cloned().unwrap(),
        ];
        let body = serde_json::to_value(ListResponse::new(data)).unwrap();

        assert_eq!(body["total"], 2);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_record_serializes_four_fields() {
        let record = Record {
            iso_code: "CO".to_string(),
            year: 2020,
            population: 5_000_000,
            total_ghg: 123.45,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"iso_code": "CO", "year": 2020, "population": 5000000, "total_ghg": 123.45})
        );
    }

    #[test]
    fn test_response_bodies_serialize_expected_keys() {
        let health = HealthResponse {
            status: "fail".to_string(),
            instance: "api-1".to_string(),
            database: "error: Connection refused".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&health).unwrap(),
            json!({"status": "fail", "instance": "api-1", "database": "error: Connection refused"})
        );

        let whoami = WhoAmIResponse {
            instance: "api-1".to_string(),
        };
        assert_eq!(serde_json::to_value(&whoami).unwrap(), json!({"instance": "api-1"}));

        assert_eq!(
            serde_json::to_value(ErrorResponse::new("boom")).unwrap(),
            json!({"error": "boom"})
        );
    }
}
