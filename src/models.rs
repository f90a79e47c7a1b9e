//! Response shapes consumed by the pages.
//!
//! These mirror what the debt API serves but only declare the fields the pages
//! read. Anything else in the payload is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Body of `GET /api/data` as seen by the debt-summary page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DebtSummaryResponse {
    pub summary: SummaryFields,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryFields {
    pub method: String,
    pub total_amount_paid: f64,
    /// Kept as the raw JSON number so it renders exactly as sent.
    pub total_months: Number,
}

/// Body of `GET /api/hello`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_ignores_extra_fields() {
        let body = json!({
            "summary": {
                "method": "avalanche",
                "total_months": 42,
                "total_interest_paid": 1000.5,
                "total_amount_paid": 25000.25
            },
            "schedule": []
        });

        let parsed: DebtSummaryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.summary.method, "avalanche");
        assert_eq!(parsed.summary.total_months.to_string(), "42");
    }

    #[test]
    fn test_missing_nested_field_is_an_error() {
        let body = json!({ "summary": { "method": "snowball", "total_months": 3 } });
        assert!(serde_json::from_value::<DebtSummaryResponse>(body).is_err());
    }

    #[test]
    fn test_hello_requires_message() {
        assert!(serde_json::from_value::<HelloResponse>(json!({ "msg": "hi" })).is_err());
    }
}
